use geo::Point;

/// A WGS84 position in degrees.
///
/// Stored as a `geo::Point` with x = longitude and y = latitude so it can be
/// handed straight to `geo` algorithms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate(Point);

impl Coordinate {
    /// Construction does not validate; hunt payloads can carry anything and
    /// the proximity judge refuses non-finite values later.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self(Point::new(longitude, latitude))
    }

    pub fn latitude(&self) -> f64 {
        self.0.y()
    }

    pub fn longitude(&self) -> f64 {
        self.0.x()
    }

    pub fn point(&self) -> Point {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.latitude().is_finite() && self.longitude().is_finite()
    }

    /// Finite and inside [-90, 90] x [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.latitude())
            && (-180.0..=180.0).contains(&self.longitude())
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Self(point)
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.0
    }
}

/// A single reading from the platform position source. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReportedPosition {
    pub coordinate: Coordinate,
    /// Horizontal uncertainty radius in meters.
    pub accuracy_meters: f64,
}

impl ReportedPosition {
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            accuracy_meters,
        }
    }
}
