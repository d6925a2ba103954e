use tracing::debug;

use crate::{
    bbox::Bbox,
    error::{Error, Result},
    input::file::{FileLoader, FsFileLoader},
    params::{Field, InputParams},
};

pub use self::geocode::{GeocodeResult, Geocoder};
pub use self::strategy::Strategy;

pub mod geocode;
pub mod strategy;

/// Resolves [`InputParams`] into a single bounding box
///
/// The first [`Strategy`] that is usable for the given params is selected.
/// Setting a field that this strategy does not use is an error, so
/// contradicting arguments are never silently ignored.
pub struct InputResolver {
    geocoder: Option<Box<dyn Geocoder>>,
    file_loader: Box<dyn FileLoader>,
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl InputResolver {
    /// Creates a resolver that loads files from the file system and has no
    /// geocoder
    pub fn new() -> Self {
        Self {
            geocoder: None,
            file_loader: Box::new(FsFileLoader),
        }
    }

    /// Sets the geocoder used to look up place names
    pub fn with_geocoder(mut self, geocoder: impl Geocoder + 'static) -> Self {
        self.geocoder = Some(Box::new(geocoder));
        self
    }

    /// Replaces the loader used for files
    pub fn with_file_loader(mut self, file_loader: impl FileLoader + 'static) -> Self {
        self.file_loader = Box::new(file_loader);
        self
    }

    /// Selects the strategy for the given params and checks that no field
    /// outside of it has been set
    pub fn select(&self, params: &InputParams) -> Result<Strategy> {
        let Some(strategy) = Strategy::PRIORITY
            .into_iter()
            .find(|s| s.is_usable(params))
        else {
            return Err(if params.is_set(Field::Buffer) {
                Error::BufferWithoutBbox
            } else {
                Error::NoUsableBuilder
            });
        };
        debug!(strategy = strategy.name(), "Selected strategy");

        let used = strategy.used_fields();
        if let Some(field) = params
            .set_fields()
            .find(|f| *f != Field::Buffer && !used.contains(f))
        {
            return Err(Error::UnexpectedArgument {
                field: field.name(),
                strategy: strategy.name(),
            });
        }

        Ok(strategy)
    }

    /// Resolves the given params into a bounding box and applies the
    /// buffer. Either the whole resolution succeeds or an error is
    /// returned.
    pub fn resolve(&self, params: &InputParams) -> Result<Bbox> {
        let strategy = self.select(params)?;
        strategy.validate(params)?;
        let bbox = strategy.build(params, self.geocoder.as_deref(), self.file_loader.as_ref())?;

        if params.is_set(Field::Buffer) {
            debug!(buffer = params.buffer, "Applying buffer");
            bbox.buffer(params.buffer)
        } else {
            Ok(bbox)
        }
    }
}

/// Resolves the given params with a default [`InputResolver`]
pub fn resolve(params: &InputParams) -> Result<Bbox> {
    InputResolver::new().resolve(params)
}
