use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::ActivityQuery;

/// The Destiny 2 endpoints this crate wraps.
#[async_trait]
pub trait Client {
    /// Searches by full Bungie name (`"Name#1234"`). `platform` is one of
    /// `xbox`, `psn`, `steam`, `stadia`, `epic`; anything else searches all.
    async fn search_destiny_player(
        &self,
        display_name: &str,
        platform: Option<&str>,
    ) -> Result<Value, ApiError>;

    async fn get_profile(
        &self,
        membership_type: i32,
        membership_id: &str,
        components: &[&str],
    ) -> Result<Value, ApiError>;

    async fn get_activity_history(
        &self,
        membership_type: i32,
        membership_id: &str,
        character_id: &str,
        query: ActivityQuery,
    ) -> Result<Value, ApiError>;
}
