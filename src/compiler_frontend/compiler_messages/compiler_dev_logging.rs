// Extra timer logging
#[macro_export]
#[cfg(feature = "detailed_timers")]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        saying::say!($msg, Green #$time.elapsed());
    };
}

#[macro_export]
#[cfg(not(feature = "detailed_timers"))]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        // Nothing
    };
}

// AST LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_ast")]
macro_rules! ast_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_ast"))]
macro_rules! ast_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// CONSTANT FOLDING LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_fold")]
macro_rules! fold_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_fold"))]
macro_rules! fold_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// DEAD CODE LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_dead_code")]
macro_rules! dead_code_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_dead_code"))]
macro_rules! dead_code_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// LOOP UNROLLING LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_unroll")]
macro_rules! unroll_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_unroll"))]
macro_rules! unroll_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}
