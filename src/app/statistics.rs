//! Statistics printing.

use log::{error, info};
use strum::IntoEnumIterator;

use crate::classify::Category;
use crate::error_handling::ProcessingStats;

/// Prints the number of targets recorded in each category.
pub fn print_category_statistics(stats: &ProcessingStats) {
    info!("Category Counts ({} total):", stats.total());
    for category in Category::iter() {
        info!("   {}: {}", category.as_str(), stats.get_count(category));
    }
    let fatal = stats.fatal_count();
    if fatal > 0 {
        error!("{} target(s) ended with a fatal error", fatal);
    }
    let unrecorded = stats.unrecorded_count();
    if unrecorded > 0 {
        error!("{} target(s) could not be written to their result file", unrecorded);
    }
}
