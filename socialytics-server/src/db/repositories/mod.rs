mod analytics_repository;
mod comment_repository;
mod post_repository;
mod relationship_repository;
mod user_repository;

pub use analytics_repository::AnalyticsRepository;
pub use comment_repository::CommentRepository;
pub use post_repository::PostRepository;
pub use relationship_repository::RelationshipRepository;
pub use user_repository::UserRepository;
