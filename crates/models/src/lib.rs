pub mod errors;
pub mod db;
pub mod types;
pub mod validation;
pub mod users;
pub mod user_credentials;
pub mod services;
pub mod case_studies;
pub mod blog_posts;
pub mod testimonials;
pub mod stats;
pub mod leads;
pub mod media_files;

#[cfg(test)]
mod tests;
