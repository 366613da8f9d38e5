//! LZP decoding subroutines.

macro_rules! module {
    ($e:ident) => {
        pub use self::$e::*;
        mod $e;
    };
}

module!(bitstream);
module!(lzp);
