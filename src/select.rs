use std::sync::OnceLock;

/// The command-line switch that selects the explicitly indexed kernel path.
pub const KERNEL_FLAG: &str = "--kernels";

static PATH: OnceLock<ExecPath> = OnceLock::new();

/// Which of the two equivalent operator realizations a process runs: the
/// vectorized whole-array path, or the explicitly indexed kernel path. The
/// two must produce results matching to floating-point rounding tolerance
/// for identical inputs, which is what lets the test suite validate each
/// against the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecPath {
    Vectorized,
    Kernel,
}

// ============================================================================
impl ExecPath {
    /// Parse a path from an argument list: the kernel path iff the flag is
    /// present.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if args.into_iter().any(|arg| arg.as_ref() == KERNEL_FLAG) {
            ExecPath::Kernel
        } else {
            ExecPath::Vectorized
        }
    }

    /// Dispatch to one of two realizations of the same operation.
    pub fn run<T, K, V>(self, kernel: K, vectorized: V) -> T
    where
        K: FnOnce() -> T,
        V: FnOnce() -> T,
    {
        match self {
            ExecPath::Kernel => kernel(),
            ExecPath::Vectorized => vectorized(),
        }
    }
}

/// Read the process invocation arguments and fix the execution path for the
/// remainder of the run. There is no per-call override: the first path
/// fixed wins, and an operator invoked before any init runs vectorized.
pub fn init() -> ExecPath {
    init_from(std::env::args().skip(1))
}

/// As `init`, from an explicit argument list.
pub fn init_from<I>(args: I) -> ExecPath
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let chosen = ExecPath::from_args(args);
    let path = *PATH.get_or_init(|| chosen);
    log::info!("operator execution path: {:?}", path);
    path
}

/// The process-wide execution path.
pub fn current() -> ExecPath {
    *PATH.get_or_init(|| ExecPath::Vectorized)
}

/// Dispatch through the process-wide execution path.
pub fn run<T, K, V>(kernel: K, vectorized: V) -> T
where
    K: FnOnce() -> T,
    V: FnOnce() -> T,
{
    current().run(kernel, vectorized)
}
