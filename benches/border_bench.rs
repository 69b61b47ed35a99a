//! Criterion benchmarks for the border detection core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use shrink_borders::{
    BorderClassifier, BorderNormalizer, BorderOptions, BoundaryScanner, ContentBox,
};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn bordered_image(width: u32, height: u32, content: ContentBox) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, WHITE);
    for y in content.y0..content.y1 {
        for x in content.x0..content.x1 {
            img.put_pixel(x, y, Rgb([30, 30, 30]));
        }
    }
    img
}

fn bench_classify(c: &mut Criterion) {
    let img = bordered_image(
        1920,
        1080,
        ContentBox {
            x0: 200,
            y0: 100,
            x1: 1720,
            y1: 980,
        },
    );
    let options = BorderOptions::default();

    c.bench_function("classify_1080p", |b| {
        b.iter(|| BorderClassifier::classify(black_box(&img), &options))
    });
}

fn bench_scan(c: &mut Criterion) {
    let img = bordered_image(
        1920,
        1080,
        ContentBox {
            x0: 200,
            y0: 100,
            x1: 1720,
            y1: 980,
        },
    );

    c.bench_function("scan_1080p", |b| {
        b.iter(|| BoundaryScanner::scan(black_box(&img), WHITE, 0))
    });

    // Worst case: a single content pixel in the middle makes every edge
    // scan walk a quarter of the image
    let mut worst = RgbImage::from_pixel(1920, 1080, WHITE);
    worst.put_pixel(960, 540, Rgb([0, 0, 0]));
    c.bench_function("scan_1080p_single_pixel", |b| {
        b.iter(|| BoundaryScanner::scan(black_box(&worst), WHITE, 0))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let content = ContentBox {
        x0: 200,
        y0: 100,
        x1: 1720,
        y1: 980,
    };
    let img = bordered_image(1920, 1080, content);

    c.bench_function("normalize_1080p", |b| {
        b.iter(|| BorderNormalizer::normalize(black_box(&img), &content, 5, WHITE))
    });
}

criterion_group!(benches, bench_classify, bench_scan, bench_normalize);
criterion_main!(benches);
