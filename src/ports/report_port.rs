//! Result output port trait.

use crate::domain::error::QuantmomError;
use crate::domain::panel::Panel;
use std::path::Path;

/// Port for writing the pipeline's output matrices.
pub trait ReportPort {
    fn write_weights(&self, weights: &Panel, output_dir: &Path) -> Result<(), QuantmomError>;

    fn write_gross_returns(&self, returns: &Panel, output_dir: &Path)
    -> Result<(), QuantmomError>;
}
