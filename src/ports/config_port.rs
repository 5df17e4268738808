//! Configuration access port trait.

/// Read-only view of `[section] key` configuration values.
///
/// Typed getters return `None` both when the key is absent and when it does
/// not parse; callers that must tell the two apart read the raw string.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_u64(&self, section: &str, key: &str) -> Option<u64>;
    fn has_key(&self, section: &str, key: &str) -> bool {
        self.get_string(section, key).is_some()
    }
}
