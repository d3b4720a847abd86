use ubyte::{ByteUnit, ToByteUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
/// An upper limit on the size of incoming request bodies.
///
/// It's deserializable, so it can be loaded from your application configuration:
///
/// ```rust
/// use pavex_bind::request::body::BodySizeLimit;
/// use ubyte::ToByteUnit;
///
/// let limit: BodySizeLimit =
///     serde_json::from_str(r#"{ "mode": "enabled", "max_size": "10 MiB" }"#).unwrap();
/// assert_eq!(limit, BodySizeLimit::Enabled { max_size: 10.mebibytes() });
/// ```
///
/// Check out [`BufferedBody::extract`](super::BufferedBody::extract) for more details.
pub enum BodySizeLimit {
    /// There is an active limit on the size of incoming request bodies.
    Enabled {
        /// The maximum size of incoming request bodies, in bytes.
        max_size: ByteUnit,
    },
    /// There is no limit on the size of incoming request bodies.
    Disabled,
}

impl Default for BodySizeLimit {
    fn default() -> Self {
        Self::Enabled {
            max_size: 2.megabytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_can_be_disabled_from_configuration() {
        let limit: BodySizeLimit = serde_json::from_str(r#"{ "mode": "disabled" }"#).unwrap();
        assert_eq!(limit, BodySizeLimit::Disabled);
    }

    #[test]
    fn sizes_can_be_plain_byte_counts() {
        let limit: BodySizeLimit =
            serde_json::from_str(r#"{ "mode": "enabled", "max_size": 1024 }"#).unwrap();
        assert_eq!(
            limit,
            BodySizeLimit::Enabled {
                max_size: 1.kibibytes()
            }
        );
    }
}
