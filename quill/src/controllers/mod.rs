pub mod article_controller;
pub mod health_controller;
pub mod search_controller;
pub mod suggest_controller;
pub mod taxonomy_controller;
