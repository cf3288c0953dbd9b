#[macro_export]
macro_rules! u8 {
    ($a:expr) => {
        if cfg!(feature = "unsafe_conversions") {
            unsafe { u8::try_from($a).unwrap_unchecked() }
        } else {
            u8::try_from($a).unwrap()
        }
    };
}

#[macro_export]
macro_rules! usize {
    ($a:expr) => {
        if cfg!(feature = "unsafe_conversions") {
            unsafe { usize::try_from($a).unwrap_unchecked() }
        } else {
            usize::try_from($a).unwrap()
        }
    };
}
