pub mod status_indicator;
