#[macro_export]
macro_rules! print_success {
    ($fmt:literal $(, $e:expr)* $(,)?) => {{
        use ::colored::Colorize as _;
        println!("{}", format!($fmt $(, $e)*).green())
    }};
}

#[macro_export]
macro_rules! print_warn {
    ($fmt:literal $(, $e:expr)* $(,)?) => {{
        use ::colored::Colorize as _;
        eprintln!("{}", format!($fmt $(, $e)*).yellow())
    }};
}
