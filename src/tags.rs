//! Source of the tag generated for every build

/// Hands out a new, increasing tag on each call
pub trait TagSource {
    fn next_tag(&self) -> String;
}

/// Current UTC time as Unix timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampTags;

impl TagSource for TimestampTags {
    fn next_tag(&self) -> String {
        time::OffsetDateTime::now_utc().unix_timestamp().to_string()
    }
}

/// Always returns the same tag
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedTag(pub String);

#[cfg(test)]
impl TagSource for FixedTag {
    fn next_tag(&self) -> String {
        self.0.clone()
    }
}
