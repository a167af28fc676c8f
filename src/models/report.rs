use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportTargetType {
    #[sea_orm(string_value = "RECIPE")]
    Recipe,
    #[sea_orm(string_value = "COMMENT")]
    Comment,
}

/// PENDING is the only non-terminal state.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl ReportStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "RESOLVED" => Some(Self::Resolved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reporter_id: i32,
    pub target_type: ReportTargetType,
    /// Set for RECIPE reports; nulled if the recipe is later deleted.
    pub recipe_id: Option<i32>,
    /// Set for COMMENT reports; nulled if the comment is later deleted.
    pub comment_id: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime,
    pub handled_by: Option<i32>,
    pub handled_at: Option<DateTime>,
    #[sea_orm(column_type = "Text", nullable)]
    pub handle_note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ReporterId",
        to = "super::member::Column::Id"
    )]
    Reporter,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::HandledBy",
        to = "super::member::Column::Id"
    )]
    Handler,
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_delete = "SetNull"
    )]
    Recipe,
    #[sea_orm(
        belongs_to = "super::recipe_comment::Entity",
        from = "Column::CommentId",
        to = "super::recipe_comment::Column::Id",
        on_delete = "SetNull"
    )]
    Comment,
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(ReportStatus::parse("resolved"), Some(ReportStatus::Resolved));
        assert_eq!(ReportStatus::parse(" PENDING "), Some(ReportStatus::Pending));
        assert_eq!(ReportStatus::parse("approved"), None);
    }

    #[test]
    fn only_pending_is_open() {
        assert!(!ReportStatus::Pending.is_terminal());
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(ReportStatus::Rejected.is_terminal());
    }
}
