pub mod models;
pub mod poem;
