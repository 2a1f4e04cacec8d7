use super::shared::NdVector;

/// Axis-aligned bounding box of the raw positions of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min: NdVector<3, f64>,
    max: NdVector<3, f64>,
}

impl Extent {
    pub fn get_min(&self) -> NdVector<3, f64> {
        self.min
    }

    pub fn get_max(&self) -> NdVector<3, f64> {
        self.max
    }

    pub fn contains(&self, point: NdVector<3, f64>) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }
}


/// Grows an [Extent] one position at a time. The first position initializes
/// both corners; no extent exists until then.
#[derive(Debug, Clone, Default)]
pub struct ExtentBuilder {
    extent: Option<Extent>,
}

impl ExtentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, point: NdVector<3, f64>) {
        self.extent = Some(match self.extent {
            None => Extent { min: point, max: point },
            Some(Extent { min, max }) => Extent {
                min: min.elem_min(point),
                max: max.elem_max(point),
            },
        });
    }

    /// Returns `None` if no position was ever added.
    pub fn build(self) -> Option<Extent> {
        self.extent
    }
}
