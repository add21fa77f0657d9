//! Benchmarks for exiftool output parsing
//!
//! Tests type-query parsing with and without diagnostic noise, and parsing
//! of the writable format list.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use takeoutfix_common::are_extensions_compatible;
use takeoutfix_exif::output::{has_error_line, parse_file_type_extension};
use takeoutfix_exif::writable::parse_writable_extension_set;

/// Typical `-s3 -FileTypeExtension` output
const TYPE_CLEAN: &str = "JPG\n";

/// Type output behind a pile of warnings
const TYPE_NOISY: &str = "Warning: [minor] Unrecognized MakerNotes\n\
Warning: Duplicate MakerNoteUnknown tag in ExifIFD\n\
Warning: [minor] Possibly incorrect maker notes offsets (fix by 1783?)\n\
\n\
HEIC\n";

/// Type output for an unreadable file
const TYPE_ERROR: &str = "Error: File format error - IMG_0001.jpg\n";

/// Sample `-listwf` output
const LIST_WRITABLE: &str = "Writable file types:
  360 3G2 3GP AAX AI ARQ ARW AVIF CR2 CR3 CRM CRW CS1 DCP DNG DR4 DVB EPS ERF
  EXIF EXV F4A F4V FFF FLIF GIF GPR HDP HEIC HEIF ICC IIQ IND INSP JNG JP2 JPEG
  JPG JXL LRV M4A M4V MEF MIE MNG MOS MOV MP4 MPO MQV MRW NEF NKSC NRW ORF ORI
  PBM PDF PEF PGM PNG PPM PS PSB PSD QTIF RAF RAW RW2 RWL SR2 SRW THM TIF TIFF
  VRD WDP WEBP X3F XMP
";

fn bench_type_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_type_extension");

    for (name, output) in [
        ("clean", TYPE_CLEAN),
        ("noisy", TYPE_NOISY),
        ("error", TYPE_ERROR),
    ] {
        group.throughput(Throughput::Bytes(output.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", name), output, |b, output| {
            b.iter(|| parse_file_type_extension(black_box(output)))
        });
        group.bench_with_input(BenchmarkId::new("has_error", name), output, |b, output| {
            b.iter(|| has_error_line(black_box(output)))
        });
    }

    group.finish();
}

fn bench_writable_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("writable_list");
    group.throughput(Throughput::Bytes(LIST_WRITABLE.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| parse_writable_extension_set(black_box(LIST_WRITABLE)))
    });

    group.finish();
}

fn bench_compatibility(c: &mut Criterion) {
    let pairs = [(".jpg", ".jpeg"), ("MOV", ".mp4"), (".heic", ".png"), (".xyz", ".xyz")];

    c.bench_function("are_extensions_compatible", |b| {
        b.iter(|| {
            for (a, bb) in pairs {
                black_box(are_extensions_compatible(black_box(a), black_box(bb)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_type_parsing,
    bench_writable_list,
    bench_compatibility
);
criterion_main!(benches);
