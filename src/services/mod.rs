// Ostap services
// Services handle configuration, the persisted onboarding flag and input normalization.

pub mod onboarding_store;
pub mod settings_engine;
pub mod url_normalizer;
