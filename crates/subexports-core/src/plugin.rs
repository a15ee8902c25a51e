//! Bundler hook contract
//!
//! A host calls [`BuildPlugin::setup`] on every plugin with the build's
//! options before bundling, then [`BuildPlugin::on_end`] on every plugin once
//! bundling has finished. The first error stops the build.
//! [`BuildHost`] is the host used when the bundler itself ran elsewhere and
//! only its options are known.

use crate::errors::SynthesisError;
use std::path::{Path, PathBuf};
use subexports_config::BuildOptions;
use tracing::{debug, info};

/// What a plugin can see of the running build
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    root: &'a Path,
    options: &'a BuildOptions,
}

impl<'a> BuildContext<'a> {
    pub fn new(root: &'a Path, options: &'a BuildOptions) -> Self {
        Self { root, options }
    }

    /// Project root; relative build paths resolve against it
    pub fn root(&self) -> &'a Path {
        self.root
    }

    pub fn options(&self) -> &'a BuildOptions {
        self.options
    }
}

pub trait BuildPlugin {
    type Output;

    fn name(&self) -> &'static str;

    /// Inspect the build configuration; errors abort the build before it runs
    fn setup(&mut self, build: &BuildContext<'_>) -> Result<(), SynthesisError>;

    /// Run after the bundler has produced its output
    fn on_end(&mut self, build: &BuildContext<'_>) -> Result<Self::Output, SynthesisError>;
}

/// Drives plugins through both phases of a build
#[derive(Debug, Clone)]
pub struct BuildHost {
    root: PathBuf,
    options: BuildOptions,
}

impl BuildHost {
    pub fn new(root: impl Into<PathBuf>, options: BuildOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn run<P: BuildPlugin>(&self, plugin: &mut P) -> Result<P::Output, SynthesisError> {
        let context = BuildContext::new(&self.root, &self.options);

        debug!("Setting up plugin '{}'", plugin.name());
        plugin.setup(&context)?;

        info!("Running end-of-build hook of plugin '{}'", plugin.name());
        plugin.on_end(&context)
    }

    /// Run `setup` on every plugin, then `on_end` on every plugin
    ///
    /// Outputs come back in plugin order. Plugins after a failing one are
    /// not called.
    pub fn run_all<O>(
        &self,
        plugins: &mut [&mut dyn BuildPlugin<Output = O>],
    ) -> Result<Vec<O>, SynthesisError> {
        let context = BuildContext::new(&self.root, &self.options);

        for plugin in plugins.iter_mut() {
            debug!("Setting up plugin '{}'", plugin.name());
            plugin.setup(&context)?;
        }

        plugins
            .iter_mut()
            .map(|plugin| {
                info!("Running end-of-build hook of plugin '{}'", plugin.name());
                plugin.on_end(&context)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        fail_setup: bool,
    }

    impl BuildPlugin for Recorder {
        type Output = usize;

        fn name(&self) -> &'static str {
            "recorder"
        }

        fn setup(&mut self, _build: &BuildContext<'_>) -> Result<(), SynthesisError> {
            self.calls.push("setup");
            if self.fail_setup {
                return Err(SynthesisError::NotSetUp("recorder"));
            }
            Ok(())
        }

        fn on_end(&mut self, _build: &BuildContext<'_>) -> Result<usize, SynthesisError> {
            self.calls.push("on_end");
            Ok(self.calls.len())
        }
    }

    #[test]
    fn test_host_runs_setup_then_on_end() {
        let host = BuildHost::new("/work/pkg", BuildOptions::default());
        let mut plugin = Recorder::default();
        let output = host.run(&mut plugin);
        assert!(output.is_ok_and(|calls| calls == 2));
        assert_eq!(plugin.calls, vec!["setup", "on_end"]);
    }

    #[test]
    fn test_setup_failure_skips_on_end() {
        let host = BuildHost::new("/work/pkg", BuildOptions::default());
        let mut plugin = Recorder {
            fail_setup: true,
            ..Default::default()
        };
        assert!(host.run(&mut plugin).is_err());
        assert_eq!(plugin.calls, vec!["setup"]);
    }

    /// Appends `{name}:{phase}` to a log shared between plugins
    struct Logged {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        fail_setup: bool,
    }

    impl Logged {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                fail_setup: false,
            }
        }
    }

    impl BuildPlugin for Logged {
        type Output = &'static str;

        fn name(&self) -> &'static str {
            self.name
        }

        fn setup(&mut self, _build: &BuildContext<'_>) -> Result<(), SynthesisError> {
            self.log.borrow_mut().push(format!("{}:setup", self.name));
            if self.fail_setup {
                return Err(SynthesisError::NotSetUp(self.name));
            }
            Ok(())
        }

        fn on_end(&mut self, _build: &BuildContext<'_>) -> Result<&'static str, SynthesisError> {
            self.log.borrow_mut().push(format!("{}:on_end", self.name));
            Ok(self.name)
        }
    }

    #[test]
    fn test_run_all_sets_up_every_plugin_first() {
        let host = BuildHost::new("/work/pkg", BuildOptions::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut first = Logged::new("first", &log);
        let mut second = Logged::new("second", &log);

        let mut plugins: [&mut dyn BuildPlugin<Output = &'static str>; 2] =
            [&mut first, &mut second];
        let outputs = host.run_all(&mut plugins);

        assert!(outputs.is_ok_and(|names| names == vec!["first", "second"]));
        assert_eq!(
            *log.borrow(),
            vec!["first:setup", "second:setup", "first:on_end", "second:on_end"]
        );
    }

    #[test]
    fn test_run_all_stops_at_first_setup_error() {
        let host = BuildHost::new("/work/pkg", BuildOptions::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut first = Logged {
            fail_setup: true,
            ..Logged::new("first", &log)
        };
        let mut second = Logged::new("second", &log);

        let mut plugins: [&mut dyn BuildPlugin<Output = &'static str>; 2] =
            [&mut first, &mut second];
        assert!(matches!(
            host.run_all(&mut plugins),
            Err(SynthesisError::NotSetUp("first"))
        ));
        assert_eq!(*log.borrow(), vec!["first:setup"]);
    }
}
