//! Ring buffer demo
//!
//! Exercises the public `RingBuffer` contract with primitive values, strings
//! and a user-defined record type, and prints the contents it builds.
//!
//! # Output Format
//!
//! Buffer contents are written to stdout, one element per line. Scenario
//! results are logged to stderr through `tracing` (`RUST_LOG` controls the
//! filter; default `info`).
//!
//! # Exit Codes
//!
//! - `0`: All scenarios passed
//! - `1`: At least one scenario failed
//! - `2`: Invalid arguments

use std::env;
use std::fmt;
use std::process::ExitCode;

use circbuf::{evaluate_each, RingBuffer, RingBufferError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CAPACITY: usize = 4;
const MIN_CAPACITY: usize = 2;
/// Scenarios build `i32` sequences up to `capacity + 1`.
const MAX_CAPACITY: usize = 1 << 20;

fn parse_capacity(value: &str) -> Option<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|n| (MIN_CAPACITY..=MAX_CAPACITY).contains(n))
}

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS]

OPTIONS:
    --capacity=<N>          Capacity of the scratch buffers (default: {DEFAULT_CAPACITY}, min: {MIN_CAPACITY}, max: {MAX_CAPACITY})
    --help, -h              Show this help message",
        exe.to_string_lossy()
    );
}

/// A university course: credits and a short name.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Course {
    credits: u32,
    name: String,
}

impl Course {
    fn new(credits: u32, name: &str) -> Self {
        Self {
            credits,
            name: name.to_string(),
        }
    }

    fn is_heavy(&self) -> bool {
        self.credits >= 8
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} credits)", self.name, self.credits)
    }
}

fn is_even(v: &i32) -> bool {
    v % 2 == 0
}

type Outcome = Result<(), String>;

fn check(cond: bool, msg: &str) -> Outcome {
    if cond {
        Ok(())
    } else {
        Err(msg.to_string())
    }
}

fn demo_values(capacity: usize) -> Result<i32, String> {
    i32::try_from(capacity)
        .ok()
        .filter(|&n| n < i32::MAX)
        .ok_or_else(|| format!("capacity {capacity} does not fit the i32 demo values"))
}

fn constructors_and_equals(capacity: usize) -> Outcome {
    let top = demo_values(capacity)?;
    let base: Vec<i32> = (1..=top).collect();
    let mut altered = base.clone();
    altered[capacity - 2] = altered[capacity - 1];

    let from_slice = RingBuffer::from_slice(&base);
    let different = RingBuffer::from_slice(&altered);

    // Overfill an empty buffer; only the last `capacity` values survive.
    let mut enqueued = RingBuffer::with_capacity(capacity);
    enqueued.enqueue(top + 1);
    enqueued.enqueue(top + 1);
    for v in &base {
        enqueued.enqueue(*v);
    }

    check(from_slice.equals(&enqueued), "equals rejected equal buffers")?;
    check(!from_slice.equals(&different), "equals accepted different buffers")
}

fn construct_from_range() -> Outcome {
    let words = ["a caso", "wat", "cat"];
    let from_range = RingBuffer::from_iter_with_capacity(2, words[1..].iter().copied());
    let from_slice = RingBuffer::from_slice(&["wat", "cat"]);
    check(from_range.equals(&from_slice), "range constructor mismatch")?;

    let overflowed = RingBuffer::from_iter_with_capacity(2, words);
    check(overflowed.equals(&from_slice), "range overflow kept the wrong tail")
}

fn copy_is_deep() -> Outcome {
    let mut source = RingBuffer::from_slice(&[0, 1, 2]);
    let copy = source.try_clone().map_err(|err: RingBufferError| err.to_string())?;
    check(copy.equals(&source), "copy differs from source")?;

    source.enqueue(3);
    source.dequeue_oldest();
    check(
        copy.iter().copied().eq([0, 1, 2]),
        "mutating the source changed the copy",
    )
}

fn custom_type_basics() -> Outcome {
    let mut first = RingBuffer::with_capacity(2);
    let mut second = RingBuffer::with_capacity(2);
    check(first.is_empty() && second.is_empty(), "new buffers are not empty")?;

    first.enqueue(Course::new(8, "PAS"));
    first.enqueue(Course::new(8, "BIO"));
    first.enqueue(Course::new(8, "RO"));
    first.dequeue_oldest();
    second.enqueue(Course::new(8, "RO"));

    check(first.equals(&second), "enqueue/pop produced the wrong contents")?;
    check(
        first.len() == 1 && second.len() == 1,
        "occupancy count is wrong",
    )
}

fn indexed_and_cursor_writes(capacity: usize) -> Outcome {
    let values: Vec<i32> = (1..=demo_values(capacity)?).collect();
    let mut ring = RingBuffer::from_slice(&values);
    print!("{ring}");

    ring[0] = 4;
    check(ring.iter().next() == Some(&4), "index write not visible to cursor")?;

    if let Some(first) = ring.iter_mut().next() {
        *first = 10;
    }
    check(ring[0] == 10, "cursor write not visible to index")?;
    print!("{ring}");
    Ok(())
}

fn evaluate_predicates() -> Outcome {
    let mut courses = RingBuffer::with_capacity(2);
    courses.enqueue(Course::new(4, "ING"));
    courses.enqueue(Course::new(8, "PAS"));
    let mut numbers = RingBuffer::with_capacity(2);
    numbers.enqueue(1);
    numbers.enqueue(2);

    println!("evaluate_each over courses (credits >= 8):");
    for (position, heavy) in evaluate_each(&courses, Course::is_heavy) {
        println!("[{position}] {}: {heavy}", courses[position]);
    }
    println!("evaluate_each over numbers (even):");
    let report: Vec<_> = evaluate_each(&numbers, is_even).collect();
    for (position, even) in &report {
        println!("[{position}] : {even}");
    }

    check(
        report == [(0, false), (1, true)],
        "evaluate_each reported the wrong results",
    )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "circbuf-demo".into());
    let mut capacity = DEFAULT_CAPACITY;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid argument: {}", arg.to_string_lossy());
            return ExitCode::from(2);
        };
        if let Some(value) = flag.strip_prefix("--capacity=") {
            match parse_capacity(value) {
                Some(n) => capacity = n,
                None => {
                    eprintln!(
                        "invalid --capacity value: {value} (must be an integer in {MIN_CAPACITY}..={MAX_CAPACITY})"
                    );
                    return ExitCode::from(2);
                }
            }
            continue;
        }
        match flag {
            "--help" | "-h" => {
                print_usage(&exe);
                return ExitCode::SUCCESS;
            }
            _ => {
                eprintln!("unknown flag: {flag}");
                print_usage(&exe);
                return ExitCode::from(2);
            }
        }
    }

    let scenarios: [(&str, Box<dyn Fn() -> Outcome>); 6] = [
        (
            "constructors, enqueue and equals",
            Box::new(move || constructors_and_equals(capacity)),
        ),
        ("construction from a range", Box::new(construct_from_range)),
        ("copy construction", Box::new(copy_is_deep)),
        ("basic operations with a custom type", Box::new(custom_type_basics)),
        (
            "indexed and cursor access",
            Box::new(move || indexed_and_cursor_writes(capacity)),
        ),
        ("evaluate_each", Box::new(evaluate_predicates)),
    ];

    let mut failed = 0usize;
    for (name, scenario) in &scenarios {
        match scenario() {
            Ok(()) => info!(scenario = *name, "passed"),
            Err(reason) => {
                failed += 1;
                error!(scenario = *name, %reason, "failed");
            }
        }
    }

    info!(total = scenarios.len(), failed, capacity, "demo finished");
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
