#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use colormask_image as image;

#[doc(inline)]
pub use colormask_imgproc as imgproc;

#[doc(inline)]
pub use colormask_io as io;
