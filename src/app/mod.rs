pub mod allergens;
pub mod pipeline;
pub mod prevalence;
pub mod product;
pub mod state;
