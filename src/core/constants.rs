//! Core constants taken from the deposit map's defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels, used by the Web Mercator projection.
pub const TILE_SIZE: f64 = 256.0;

/// Initial map centre (roughly the middle of the contiguous United States).
pub const DEFAULT_CENTER: (f64, f64) = (40.0, -98.5);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 4.0;

/// Substring that marks a year-keyed deposit field.
pub const DEFAULT_ATTRIBUTE_MARKER: &str = "Deposits";

/// Property holding the display name of a record.
pub const DEFAULT_IDENTITY_FIELD: &str = "City";

/// Unit appended to every value shown in popups and the legend.
pub const DEFAULT_VALUE_UNIT: &str = "thousand";

/// Separator between the parts of an attribute key (`Deposits_2010`).
pub const KEY_DELIMITER: char = '_';

/// Scale factor of the compact symbol preset.
pub const COMPACT_SCALE_FACTOR: f64 = 5.0;

/// Scale factor of the expanded symbol preset.
pub const EXPANDED_SCALE_FACTOR: f64 = 50.0;

/// Legend canvas size in pixels.
pub const LEGEND_SIZE: (f64, f64) = (220.0, 100.0);

/// Baseline the legend circles sit on (`cy = baseline - r`).
pub const LEGEND_BASELINE: f64 = 90.0;

/// Horizontal centre of the legend circles.
pub const LEGEND_CIRCLE_X: f64 = 45.0;

/// Horizontal start of the legend labels.
pub const LEGEND_TEXT_X: f64 = 92.0;

/// Vertical position of the max, mean and min labels.
pub const LEGEND_TEXT_Y: [f64; 3] = [20.0, 49.0, 80.0];

/// Lines of the info panel
pub const HELP_LINES: [&str; 3] = [
    "Use the home button to return to the initial extent of the map",
    "Hover over a circle to see the city and its deposits",
    "Use the arrow buttons or the slider to display the number of deposits for different years",
];

pub const DATA_SOURCE_CREDIT: &str = "Source: https://www.kaggle.com/chasebank/bank-deposits/data";

pub const WELCOME_TITLE: &str = "Chase bank deposits";
pub const WELCOME_TEXT: &str =
    "Circle area shows the deposits held in each city. Click anywhere to start exploring.";
