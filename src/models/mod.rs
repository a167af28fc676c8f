pub mod follow;
pub mod ingredient;
pub mod member;
pub mod rating;
pub mod recipe;
pub mod recipe_comment;
pub mod recipe_ingredient;
pub mod recipe_like;
pub mod recipe_step;
pub mod recipe_summary;
pub mod recipe_tag;
pub mod report;
pub mod tag;
pub mod user_sanction;

pub use follow::Entity as Follow;
pub use ingredient::{Entity as Ingredient, Model as IngredientModel};
pub use member::{Entity as Member, MemberRole, Model as MemberModel};
pub use rating::{Entity as Rating, Model as RatingModel};
pub use recipe::{Entity as Recipe, Model as RecipeModel};
pub use recipe_comment::{Entity as RecipeComment, Model as RecipeCommentModel};
pub use recipe_ingredient::{Entity as RecipeIngredient, Model as RecipeIngredientModel};
pub use recipe_like::Entity as RecipeLike;
pub use recipe_step::{Entity as RecipeStep, Model as RecipeStepModel};
pub use recipe_summary::{Entity as RecipeSummary, Model as RecipeSummaryModel};
pub use recipe_tag::Entity as RecipeTag;
pub use report::{Entity as Report, Model as ReportModel, ReportStatus, ReportTargetType};
pub use tag::{Entity as Tag, Model as TagModel};
pub use user_sanction::{Entity as UserSanction, Model as UserSanctionModel, SanctionKind};
