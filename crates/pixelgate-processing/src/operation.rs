//! Named operations exposed to callers

use pixelgate_core::OperationError;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Info,
    Resize,
    Enlarge,
    Extract,
    Crop,
    Rotate,
    Flip,
    Flop,
    Thumbnail,
    Zoom,
    Convert,
    Watermark,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::Info,
        Operation::Resize,
        Operation::Enlarge,
        Operation::Extract,
        Operation::Crop,
        Operation::Rotate,
        Operation::Flip,
        Operation::Flop,
        Operation::Thumbnail,
        Operation::Zoom,
        Operation::Convert,
        Operation::Watermark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Info => "info",
            Operation::Resize => "resize",
            Operation::Enlarge => "enlarge",
            Operation::Extract => "extract",
            Operation::Crop => "crop",
            Operation::Rotate => "rotate",
            Operation::Flip => "flip",
            Operation::Flop => "flop",
            Operation::Thumbnail => "thumbnail",
            Operation::Zoom => "zoom",
            Operation::Convert => "convert",
            Operation::Watermark => "watermark",
        }
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OperationError::InvalidArgument(format!("Unknown operation: {}", s)))
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation() {
        assert_eq!("resize".parse::<Operation>().unwrap(), Operation::Resize);
        assert_eq!("Watermark".parse::<Operation>().unwrap(), Operation::Watermark);
        assert!(matches!(
            "blur".parse::<Operation>(),
            Err(OperationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_names_are_unique() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }
}
