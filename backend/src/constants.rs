// =============================================================================
// SproutSwap Backend Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

// =============================================================================
// CANDIDATE DISCOVERY
// =============================================================================

/// Search radius applied when a user's preferences carry no usable radius
/// (zero or negative values fall back to this)
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 10.0;

/// Candidate count returned when the client does not ask for a specific amount
pub const DEFAULT_CANDIDATE_COUNT: usize = 20;

/// Hard cap on candidates returned per request, whatever the client asks for
pub const MAX_CANDIDATES_PER_REQUEST: usize = 100;

// =============================================================================
// SWIPE INGESTION
// =============================================================================

/// Maximum number of swipe decisions accepted in one batch request
pub const MAX_SWIPES_PER_BATCH: usize = 100;

// =============================================================================
// GEO
// =============================================================================

/// Mean Earth radius used by the haversine distance calculation
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude, used for the bounding-box prefilter
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 3000;
