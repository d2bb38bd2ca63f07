//! Per-schema configuration.
//!
//! This module provides the [`SchemaConfig`] struct used by
//! [`SchemaBuilder`](crate::SchemaBuilder) while validating a field table.
//!
//! # Example
//! ```rust
//! use jsonmodel::{CollisionPolicy, SchemaConfig};
//!
//! let config = SchemaConfig::new()
//!     .with_max_candidate_keys(3)
//!     .with_collision_policy(CollisionPolicy::Reject);
//! assert_eq!(config.max_candidate_keys, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of candidate keys a field may declare (primary + 4 fallbacks).
pub const DEFAULT_MAX_CANDIDATE_KEYS: usize = 5;

/// How a child schema treats a primary key that collides with one of its
/// parent's primary keys.
///
/// Parent and child fields are encoded into one flat key space, so a
/// collision means one of the two values is lost on encode.
///
/// # Variants
///
/// * `ChildWins` - The child's value overwrites the parent's. A warning is
///   logged when the schema is built.
///
/// * `Reject` - Building the child schema fails with
///   [`Error::SchemaConflict`](crate::Error::SchemaConflict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The child's value overwrites the parent's on encode.
    #[default]
    ChildWins,
    /// Colliding keys are a schema-build error.
    Reject,
}

/// Schema-build configuration.
///
/// # Fields
///
/// * `max_candidate_keys` - Maximum number of candidate keys per field.
///   Default: 5.
///
/// * `parent_key_collision` - Policy for primary keys shared with the
///   parent schema. Default: `ChildWins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Maximum candidate keys per field (default: 5)
    pub max_candidate_keys: usize,
    /// Parent/child primary-key collision policy (default: ChildWins)
    pub parent_key_collision: CollisionPolicy,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_candidate_keys: DEFAULT_MAX_CANDIDATE_KEYS,
            parent_key_collision: CollisionPolicy::default(),
        }
    }
}

impl SchemaConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of candidate keys per field.
    pub fn with_max_candidate_keys(mut self, max: usize) -> Self {
        self.max_candidate_keys = max;
        self
    }

    /// Set the parent/child key collision policy.
    ///
    /// # Example
    /// ```rust
    /// use jsonmodel::{CollisionPolicy, SchemaConfig};
    ///
    /// let config = SchemaConfig::new().with_collision_policy(CollisionPolicy::Reject);
    /// assert_eq!(config.parent_key_collision, CollisionPolicy::Reject);
    /// ```
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.parent_key_collision = policy;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_candidate_keys == 0 {
            return Err("max_candidate_keys must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert_eq!(config.max_candidate_keys, 5);
        assert_eq!(config.parent_key_collision, CollisionPolicy::ChildWins);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_keys_invalid() {
        let config = SchemaConfig::new().with_max_candidate_keys(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&CollisionPolicy::ChildWins).unwrap();
        assert_eq!(json, "\"child_wins\"");
        let policy: CollisionPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, CollisionPolicy::Reject);
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: SchemaConfig =
            serde_json::from_str(r#"{"parent_key_collision": "reject"}"#).unwrap();
        assert_eq!(config.max_candidate_keys, DEFAULT_MAX_CANDIDATE_KEYS);
        assert_eq!(config.parent_key_collision, CollisionPolicy::Reject);
    }
}
