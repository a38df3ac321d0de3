use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use beanmock_core::{Bean, FieldDescriptor, TypeCatalog, Value, field_names, resolve, type_ids};

use crate::config::MockConfig;
use crate::errors::MockError;
use crate::model::{BuildOptions, DepthPolicy, MAX_DEPTH_LIMIT};
use crate::registry::{RegistrySettings, TypeValueRegistry};
use crate::source::{Clock, RandomSource, ScalarSource, SystemClock};

/// Entry point for building and filling mock beans.
///
/// The engine owns its catalog, registry, value source and clock; nothing
/// about a built bean is retained after a call returns.
pub struct MockEngine {
    catalog: Arc<TypeCatalog>,
    registry: Arc<TypeValueRegistry>,
    /// Settings of the engine's own registry; `None` once one is injected.
    owned_registry: Option<RegistrySettings>,
    source: Box<dyn ScalarSource>,
    clock: Box<dyn Clock>,
    options: BuildOptions,
}

#[derive(Clone, Copy)]
enum Pass {
    Build,
    Fill,
}

impl MockEngine {
    /// Engine with an OS-seeded source, the system clock and a registry
    /// built from them.
    pub fn new(catalog: impl Into<Arc<TypeCatalog>>) -> Self {
        let mut source = RandomSource::from_entropy();
        let registry = TypeValueRegistry::new(&mut source, &SystemClock);
        Self {
            catalog: catalog.into(),
            registry: Arc::new(registry),
            owned_registry: Some(RegistrySettings::default()),
            source: Box::new(source),
            clock: Box::new(SystemClock),
            options: BuildOptions::default(),
        }
    }

    pub fn from_config(
        catalog: impl Into<Arc<TypeCatalog>>,
        config: &MockConfig,
    ) -> Result<Self, MockError> {
        config.validate()?;
        let settings = config.registry_settings()?;
        let mut source = RandomSource::from_seed_option(config.seed);
        let registry =
            TypeValueRegistry::with_settings(settings.clone(), &mut source, &SystemClock);
        Ok(Self {
            catalog: catalog.into(),
            registry: Arc::new(registry),
            owned_registry: Some(settings),
            source: Box::new(source),
            clock: Box::new(SystemClock),
            options: config.build_options().clamped(),
        })
    }

    /// Use a caller-built registry. Later source or clock changes leave it
    /// untouched.
    pub fn with_registry(mut self, registry: Arc<TypeValueRegistry>) -> Self {
        self.registry = registry;
        self.owned_registry = None;
        self
    }

    /// Replace the value source. The engine's own registry is rebuilt from
    /// it, so static values follow the new source too.
    pub fn with_source(mut self, source: impl ScalarSource + 'static) -> Self {
        self.source = Box::new(source);
        self.rebuild_owned_registry();
        self
    }

    /// Replace the clock. The engine's own registry is rebuilt so static
    /// dates are taken from it.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.rebuild_owned_registry();
        self
    }

    /// Set build options; `max_depth` is capped at [`MAX_DEPTH_LIMIT`].
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        if options.max_depth > MAX_DEPTH_LIMIT {
            warn!(
                requested = options.max_depth,
                limit = MAX_DEPTH_LIMIT,
                "max_depth capped"
            );
        }
        self.options = options.clamped();
        self
    }

    fn rebuild_owned_registry(&mut self) {
        if let Some(settings) = &self.owned_registry {
            let registry = TypeValueRegistry::with_settings(
                settings.clone(),
                self.source.as_mut(),
                self.clock.as_ref(),
            );
            self.registry = Arc::new(registry);
        }
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &Arc<TypeValueRegistry> {
        &self.registry
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Build a new bean using the default recursion policy.
    ///
    /// Failures are logged and reported as `None`; use [`Self::try_build`]
    /// to tell them apart.
    pub fn build(&mut self, type_name: &str) -> Option<Bean> {
        self.build_with(type_name, self.options.default_recurse)
    }

    pub fn build_with(&mut self, type_name: &str, recurse: bool) -> Option<Bean> {
        match self.try_build(type_name, recurse) {
            Ok(bean) => Some(bean),
            Err(err) => {
                warn!(type_name, recurse, error = %err, "bean build failed");
                None
            }
        }
    }

    pub fn try_build(&mut self, type_name: &str, recurse: bool) -> Result<Bean, MockError> {
        info!(type_name, recurse, "building bean");
        self.build_at(type_name, recurse, 0)
    }

    /// Populate the null fields of `bean` using the default recursion policy.
    pub fn fill(&mut self, bean: Bean) -> Option<Bean> {
        self.fill_with(bean, self.options.default_recurse)
    }

    pub fn fill_with(&mut self, bean: Bean, recurse: bool) -> Option<Bean> {
        let type_name = bean.type_name().to_string();
        match self.try_fill(bean, recurse) {
            Ok(bean) => Some(bean),
            Err(err) => {
                warn!(type_name = %type_name, recurse, error = %err, "bean fill failed");
                None
            }
        }
    }

    /// Populate only the fields of `bean` that currently read as null.
    ///
    /// On failure the instance is dropped; partial work is never returned.
    pub fn try_fill(&mut self, mut bean: Bean, recurse: bool) -> Result<Bean, MockError> {
        info!(type_name = bean.type_name(), recurse, "filling bean");
        if !self.catalog.contains(bean.type_name()) {
            return Err(MockError::UnknownType(bean.type_name().to_string()));
        }
        self.populate(&mut bean, recurse, 0, Pass::Fill)?;
        Ok(bean)
    }

    fn build_at(&mut self, type_name: &str, recurse: bool, depth: usize) -> Result<Bean, MockError> {
        let def = self
            .catalog
            .get(type_name)
            .ok_or_else(|| MockError::Construction {
                type_name: type_name.to_string(),
                reason: "type is not described by the catalog".to_string(),
            })?;
        if !def.constructible {
            return Err(MockError::Construction {
                type_name: type_name.to_string(),
                reason: "no accessible no-argument constructor".to_string(),
            });
        }

        let mut bean = Bean::new(type_name);
        self.populate(&mut bean, recurse, depth, Pass::Build)?;
        Ok(bean)
    }

    fn populate(
        &mut self,
        bean: &mut Bean,
        recurse: bool,
        depth: usize,
        pass: Pass,
    ) -> Result<(), MockError> {
        let catalog = Arc::clone(&self.catalog);
        let mut written = HashSet::new();

        for name in field_names(&catalog, bean.type_name()) {
            if written.contains(&name) {
                continue;
            }
            let descriptor = match resolve(&catalog, bean.type_name(), &name) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    debug!(type_name = bean.type_name(), field = %name, error = %err, "field skipped");
                    continue;
                }
            };
            if matches!(pass, Pass::Fill) {
                let current = bean.read(&descriptor).map_err(MockError::Access)?;
                if !current.is_null() {
                    continue;
                }
            }

            let Some(value) = self.generate(&descriptor, recurse, depth)? else {
                continue;
            };
            debug!(
                type_name = bean.type_name(),
                field = %name,
                declared = %descriptor.declared_type,
                depth,
                "field populated"
            );
            bean.write(&descriptor, value).map_err(MockError::Access)?;
            written.insert(name);
        }

        Ok(())
    }

    /// Value for one field, or `None` to leave it unset.
    fn generate(
        &mut self,
        descriptor: &FieldDescriptor,
        recurse: bool,
        depth: usize,
    ) -> Result<Option<Value>, MockError> {
        let declared = descriptor.declared_type.as_str();
        if declared == type_ids::STRING {
            return Ok(Some(Value::String(
                self.source.default_string(&descriptor.name),
            )));
        }

        if let Some(kind) = self.registry.lookup(declared) {
            let value = self
                .registry
                .value_for(kind, self.source.as_mut(), self.clock.as_ref());
            return Ok(Some(value));
        }

        if !recurse {
            return Ok(None);
        }

        let next = depth + 1;
        if next > self.options.max_depth {
            return match self.options.depth_policy {
                DepthPolicy::Fail => Err(MockError::MaxDepthExceeded {
                    type_name: declared.to_string(),
                    max_depth: self.options.max_depth,
                }),
                DepthPolicy::Truncate => {
                    debug!(field = %descriptor.name, depth = next, "depth bound reached, field left unset");
                    Ok(None)
                }
            };
        }

        match self.build_at(declared, recurse, next) {
            Ok(nested) => Ok(Some(Value::Bean(Box::new(nested)))),
            Err(err @ MockError::MaxDepthExceeded { .. }) => Err(err),
            Err(err) => {
                debug!(
                    field = %descriptor.name,
                    declared,
                    error = %err,
                    "nested build failed, field set to null"
                );
                Ok(Some(Value::Null))
            }
        }
    }
}
