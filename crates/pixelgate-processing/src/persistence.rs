use pixelgate_core::ImageOptions;

/// Destination for a transformed image. Only exists when the caller named
/// both a bucket and an object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceDirective {
    pub bucket: String,
    pub object_name: String,
}

impl PersistenceDirective {
    pub fn from_options(opts: &ImageOptions) -> Option<Self> {
        opts.persistence_target()
            .map(|(bucket, object_name)| PersistenceDirective {
                bucket: bucket.to_string(),
                object_name: object_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_destination_is_skipped() {
        let opts = ImageOptions {
            name: Some("out.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(PersistenceDirective::from_options(&opts), None);
    }

    #[test]
    fn test_full_destination() {
        let opts = ImageOptions {
            bucket: Some("photos".to_string()),
            name: Some("out.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(
            PersistenceDirective::from_options(&opts),
            Some(PersistenceDirective {
                bucket: "photos".to_string(),
                object_name: "out.jpg".to_string(),
            })
        );
    }
}
