//! Repository structs: static methods over a `&PgPool`, one per table.

pub mod celebrity_repo;
pub mod product_repo;
pub mod user_repo;
pub mod video_repo;
pub mod video_tag_repo;

pub use celebrity_repo::CelebrityRepo;
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
pub use video_tag_repo::VideoTagRepo;
