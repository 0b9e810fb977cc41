use {super::*, crate::source::MockFile};

const MEMINFO: &str = "\
MemTotal:       16000000 kB
MemFree:         2000000 kB
MemAvailable:    4000000 kB
Buffers:          500000 kB
Cached:          3000000 kB
SwapCached:            0 kB
SReclaimable:     250000 kB
SwapTotal:       2000000 kB
SwapFree:        1500000 kB
HugePages_Total:       0
";

#[test]
fn parses_a_typical_document() {
    let sample = MEMINFO.parse::<MemorySample>().unwrap();
    assert_eq!(sample.total, 16_000_000 * 1024);
    assert_eq!(sample.available, 4_000_000 * 1024);
    assert_eq!(sample.used, 12_000_000 * 1024);
    assert_eq!(sample.cached, 3_250_000 * 1024);
    assert_eq!(sample.ram_percentage, 75.0);
    assert_eq!(sample.swap_used, 500_000 * 1024);
    assert_eq!(sample.swap_percentage, 25.0);
}

#[test]
fn estimates_available_on_old_kernels() {
    let meminfo = "MemTotal: 1000 kB\nMemFree: 100 kB\nBuffers: 100 kB\nCached: 200 kB\n";
    let sample = meminfo.parse::<MemorySample>().unwrap();
    assert_eq!(sample.available, 400 * 1024);
    assert_eq!(sample.ram_percentage, 60.0);
}

#[test]
fn no_swap_is_zero_percent() {
    let meminfo = "MemTotal: 1000 kB\nMemFree: 500 kB\nMemAvailable: 500 kB\nSwapTotal: 0 kB\nSwapFree: 0 kB\n";
    let sample = meminfo.parse::<MemorySample>().unwrap();
    assert_eq!(sample.swap_total, 0);
    assert_eq!(sample.swap_percentage, 0.0);
}

#[test]
fn missing_total() {
    let err = "MemFree: 500 kB\n".parse::<MemorySample>().unwrap_err();
    assert!(matches!(err, MemInfoError::Missing("MemTotal")));
}

#[test]
fn zero_total() {
    let err = "MemTotal: 0 kB\nMemFree: 0 kB\n".parse::<MemorySample>().unwrap_err();
    assert!(matches!(err, MemInfoError::ZeroTotal));
}

#[test]
fn bad_value() {
    let err = "MemTotal: lots kB\n".parse::<MemorySample>().unwrap_err();
    match err {
        MemInfoError::Value { key, .. } => assert_eq!(key, "MemTotal"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reads_from_a_source() {
    let source = MockFile::new([MEMINFO]);
    let sample = MemorySample::read(&source).unwrap();
    assert_eq!(sample.percentage(), 75.0);
}

#[test]
fn unreadable_source() {
    let err = MemorySample::read(&MockFile::default()).unwrap_err();
    assert!(matches!(err, MemInfoError::Io(_)));
}
