use rayon::prelude::*;

use colormask_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The work is split by rows; `f` receives the source pixel and the
/// destination pixel as channel slices.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let src_stride = C1 * src.cols();
    let dst_stride = C2 * src.cols();
    // a zero-width image has no rows to visit
    if src_stride == 0 || dst_stride == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(src_stride)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(dst_stride))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}
