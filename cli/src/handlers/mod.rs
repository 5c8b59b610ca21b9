mod evaluate;
mod predict;

pub use evaluate::handle_evaluate;
pub use predict::{PredictionMode, handle_predict, write_confidence_csv, write_probability_csv};
