pub mod results_refresher;

pub use results_refresher::{spawn_results_refresher, RefreshHandle, ResultsSource};
