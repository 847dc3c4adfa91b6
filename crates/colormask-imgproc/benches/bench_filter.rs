use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use colormask_image::{Image, ImageSize};
use colormask_imgproc::filter::hsv_range_filter;

fn bench_hsv_range_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("HsvRangeFilter");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));
        let label = format!("{width}x{height}");

        let img_data = vec![128u8; width * height * 3];
        let size = ImageSize {
            width: *width,
            height: *height,
        };

        let img = Image::<u8, 3>::new(size, img_data).unwrap();

        let lower = [40u8, 40, 40];
        let upper = [200u8, 200, 200];

        group.bench_with_input(BenchmarkId::new("full_pipeline", &label), &img, |b, src| {
            b.iter(|| std::hint::black_box(hsv_range_filter(src, &lower, &upper).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hsv_range_filter);
criterion_main!(benches);
