pub mod aggregation;
pub mod calendar_service;
pub mod deadline_service;
pub mod digest_service;
pub mod dispatch;
pub mod months;
pub mod stats_service;
pub mod text_rules;
pub mod week_service;
