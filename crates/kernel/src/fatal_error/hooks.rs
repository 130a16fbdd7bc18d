use crate::KernelError::{DuplicateFatalHook, FatalHookRegistryFull};
use crate::KernelResult;
use heapless::Vec;

/// Maximum number of hooks the registry can hold.
pub const K_MAX_FATAL_HOOKS: usize = 16;

/// Cleanup function run on a fatal error.
///
/// It runs in the context that faulted: it must not allocate, must not block and should only
/// touch state that is still meaningful after a fault.
pub type FatalErrorHandler = fn();

/// A named cleanup action run on a fatal error.
///
/// Hooks are declared with [`crate::fatal_error_hook!`] and live for the whole program.
#[derive(Debug)]
pub struct FatalErrorHook {
    name: &'static str,
    handler: FatalErrorHandler,
}

impl FatalErrorHook {
    pub const fn new(p_name: &'static str, p_handler: FatalErrorHandler) -> Self {
        FatalErrorHook {
            name: p_name,
            handler: p_handler,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handler(&self) -> FatalErrorHandler {
        self.handler
    }
}

/// Declares a fatal error hook.
///
/// Expands to a `pub static` named after the hook, exported under that same symbol name. Two
/// hooks sharing a name in one firmware do not build: in the same module the item is defined
/// twice, across crates the linker sees the symbol twice.
///
/// Declaring a hook does not arm it. It only runs if it is also part of
/// [`crate::BootConfig::fatal_hooks`]; a hook missing from that list is silently never called.
///
/// ```ignore
/// fn led_off() { /* ... */ }
///
/// kernel::fatal_error_hook!(led_off_on_fatal, led_off);
/// ```
#[macro_export]
macro_rules! fatal_error_hook {
    ($name:ident, $handler:expr) => {
        #[allow(non_upper_case_globals)]
        #[unsafe(no_mangle)]
        pub static $name: $crate::FatalErrorHook =
            $crate::FatalErrorHook::new(stringify!($name), $handler);
    };
}

/// Ordered table of the hooks run on a fatal error.
///
/// The table is filled during startup and never changes once armed.
#[derive(Debug)]
pub struct HookRegistry {
    hooks: Vec<&'static FatalErrorHook, K_MAX_FATAL_HOOKS>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        HookRegistry { hooks: Vec::new() }
    }

    /// Builds a registry holding `p_hooks`, in the given order.
    ///
    /// # Errors
    /// Same as [`HookRegistry::register`], for the first hook that cannot be added.
    pub fn from_hooks(p_hooks: &[&'static FatalErrorHook]) -> KernelResult<Self> {
        let mut l_registry = HookRegistry::new();
        for l_hook in p_hooks {
            l_registry.register(*l_hook)?;
        }
        Ok(l_registry)
    }

    /// Appends a hook. Hooks run in the order they are registered.
    ///
    /// # Errors
    /// - [`crate::KernelError::DuplicateFatalHook`] if a hook with the same name is already
    ///   registered.
    /// - [`crate::KernelError::FatalHookRegistryFull`] if [`K_MAX_FATAL_HOOKS`] hooks are
    ///   already registered.
    pub fn register(&mut self, p_hook: &'static FatalErrorHook) -> KernelResult<()> {
        if self.hooks.iter().any(|l_hook| l_hook.name == p_hook.name) {
            return Err(DuplicateFatalHook(p_hook.name));
        }

        self.hooks
            .push(p_hook)
            .map_err(|_| FatalHookRegistryFull(p_hook.name))
    }

    /// Returns the registered handlers, in registration order.
    ///
    /// The iterator is lazy and can be requested again to walk the same handlers in the same
    /// order.
    pub fn for_each(&self) -> impl Iterator<Item = FatalErrorHandler> + '_ {
        self.hooks.iter().map(|l_hook| l_hook.handler)
    }

    /// Returns the registered hooks, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FatalErrorHook> + '_ {
        self.hooks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KernelError;
    use std::boxed::Box;
    use std::format;
    use std::vec::Vec as StdVec;

    fn noop() {}

    static FIRST: FatalErrorHook = FatalErrorHook::new("first", noop);
    static SECOND: FatalErrorHook = FatalErrorHook::new("second", noop);
    static THIRD: FatalErrorHook = FatalErrorHook::new("third", noop);

    crate::fatal_error_hook!(hooks_test_declared, noop);

    #[test]
    fn macro_declares_named_hook() {
        assert_eq!(hooks_test_declared.name(), "hooks_test_declared");
        (hooks_test_declared.handler())();
    }

    #[test]
    fn registration_order_is_kept() {
        let l_registry = HookRegistry::from_hooks(&[&SECOND, &FIRST, &THIRD]).unwrap();

        let l_names: StdVec<_> = l_registry.iter().map(|l_hook| l_hook.name()).collect();
        assert_eq!(l_names, ["second", "first", "third"]);
        assert_eq!(l_registry.len(), 3);
        assert_eq!(l_registry.for_each().count(), 3);
    }

    #[test]
    fn walking_twice_gives_the_same_order() {
        let l_registry = HookRegistry::from_hooks(&[&FIRST, &SECOND, &THIRD]).unwrap();

        let l_once: StdVec<_> = l_registry.iter().map(|l_hook| l_hook.name()).collect();
        let l_twice: StdVec<_> = l_registry.iter().map(|l_hook| l_hook.name()).collect();
        assert_eq!(l_once, l_twice);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        static FIRST_AGAIN: FatalErrorHook = FatalErrorHook::new("first", noop);

        let mut l_registry = HookRegistry::new();
        l_registry.register(&FIRST).unwrap();
        assert_eq!(
            l_registry.register(&FIRST_AGAIN),
            Err(KernelError::DuplicateFatalHook("first"))
        );
        assert_eq!(l_registry.len(), 1);
    }

    #[test]
    fn table_is_bounded() {
        let mut l_registry = HookRegistry::new();
        for l_i in 0..K_MAX_FATAL_HOOKS {
            let l_name: &'static str = Box::leak(format!("hook_{}", l_i).into_boxed_str());
            let l_hook: &'static FatalErrorHook =
                Box::leak(Box::new(FatalErrorHook::new(l_name, noop)));
            l_registry.register(l_hook).unwrap();
        }

        assert_eq!(
            l_registry.register(&FIRST),
            Err(KernelError::FatalHookRegistryFull("first"))
        );
        assert_eq!(l_registry.len(), K_MAX_FATAL_HOOKS);
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let l_registry = HookRegistry::default();
        assert!(l_registry.is_empty());
        assert_eq!(l_registry.for_each().count(), 0);
    }
}
