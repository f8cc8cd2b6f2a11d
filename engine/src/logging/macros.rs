/// Log through `tracing` when the global `LogConfig` allows `$level` for `$scope`.
#[macro_export]
macro_rules! scoped_log {
    ($level:ident, $scope:expr, $($arg:tt)*) => {{
        let log_config = $crate::logging::get_log_config();
        if log_config.should_log($scope, $crate::logging::Level::$level) {
            $crate::logging::event!($crate::logging::Level::$level, scope = $scope, $($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! nav_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "navigation", $($arg)*)
    };
}

#[macro_export]
macro_rules! pick_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "picking", $($arg)*)
    };
}

#[macro_export]
macro_rules! input_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "input", $($arg)*)
    };
}

#[macro_export]
macro_rules! scene_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "scene", $($arg)*)
    };
}
