use bytes::Bytes;

/// Uniform result of every operation: the output body and its content type.
///
/// For image operations the body is the encoded image and the content type is
/// detected from the body by the engine. For the info operation the body is a
/// JSON metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutput {
    pub body: Bytes,
    pub mime: String,
}

impl ImageOutput {
    pub fn new(body: impl Into<Bytes>, mime: impl Into<String>) -> Self {
        ImageOutput {
            body: body.into(),
            mime: mime.into(),
        }
    }
}
