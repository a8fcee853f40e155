//! Operation entry points
//!
//! One async function per named operation, all with the same shape:
//! `(&Executor, Bytes, &ImageOptions) -> OperationResult<ImageOutput>`.
//! Each validates its required options first, so an invalid request never
//! reaches the engine, then builds a descriptor and hands it to the executor.

use crate::builder::build_descriptor;
use crate::executor::Executor;
use crate::format::ImageType;
use crate::operation::Operation;
use crate::output::ImageOutput;
use crate::persistence::PersistenceDirective;
use bytes::Bytes;
use pixelgate_core::constants::INFO_CONTENT_TYPE;
use pixelgate_core::{ImageOptions, OperationError, OperationResult};

async fn transform(
    executor: &Executor,
    operation: Operation,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    let descriptor = build_descriptor(operation, opts);
    let directive = PersistenceDirective::from_options(opts);
    tracing::debug!(
        operation = %operation,
        input_size = buf.len(),
        persist = directive.is_some(),
        "Dispatching to engine"
    );
    executor.execute(buf, descriptor, directive).await
}

fn require_any_dimension(opts: &ImageOptions) -> OperationResult<()> {
    if opts.has_any_dimension() {
        Ok(())
    } else {
        Err(OperationError::missing_param("height or width"))
    }
}

pub async fn info(
    executor: &Executor,
    buf: Bytes,
    _opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    let metadata = executor.metadata(buf).await.map_err(|e| match e {
        OperationError::EngineFailure(message) => OperationError::InvalidArgument(format!(
            "Cannot retrieve image metadata: {}",
            message
        )),
        other => other,
    })?;
    let body = serde_json::to_vec(&metadata)?;
    Ok(ImageOutput::new(body, INFO_CONTENT_TYPE))
}

pub async fn resize(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    require_any_dimension(opts)?;
    transform(executor, Operation::Resize, buf, opts).await
}

pub async fn enlarge(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    if !opts.has_both_dimensions() {
        return Err(OperationError::missing_param("height, width"));
    }
    transform(executor, Operation::Enlarge, buf, opts).await
}

pub async fn extract(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    if !opts.has_area() {
        return Err(OperationError::missing_param("areawidth or areaheight"));
    }
    transform(executor, Operation::Extract, buf, opts).await
}

pub async fn crop(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    require_any_dimension(opts)?;
    transform(executor, Operation::Crop, buf, opts).await
}

pub async fn rotate(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    if opts.rotate_or_zero() == 0 {
        return Err(OperationError::missing_param("rotate"));
    }
    transform(executor, Operation::Rotate, buf, opts).await
}

pub async fn flip(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    transform(executor, Operation::Flip, buf, opts).await
}

pub async fn flop(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    transform(executor, Operation::Flop, buf, opts).await
}

pub async fn thumbnail(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    require_any_dimension(opts)?;
    transform(executor, Operation::Thumbnail, buf, opts).await
}

pub async fn zoom(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    if opts.factor_or_zero() == 0 {
        return Err(OperationError::missing_param("factor"));
    }
    if opts.has_offset() && !opts.has_area() {
        return Err(OperationError::missing_param("areawidth, areaheight"));
    }
    transform(executor, Operation::Zoom, buf, opts).await
}

pub async fn convert(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    let name = opts.image_type();
    if name.trim().is_empty() {
        return Err(OperationError::missing_param("type"));
    }
    if ImageType::from_name(name).is_none() {
        return Err(OperationError::InvalidArgument(format!(
            "Invalid image type: {}",
            name
        )));
    }
    transform(executor, Operation::Convert, buf, opts).await
}

pub async fn watermark(
    executor: &Executor,
    buf: Bytes,
    opts: &ImageOptions,
) -> OperationResult<ImageOutput> {
    if opts.text().is_empty() {
        return Err(OperationError::missing_param("text"));
    }
    transform(executor, Operation::Watermark, buf, opts).await
}
