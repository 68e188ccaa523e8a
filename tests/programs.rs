use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};

use crossbeam_utils::thread;

use chip8_core::{Builder, Chip8, Context, Fault, Status, HEIGHT, WIDTH};

struct TestingContext;

impl Context for TestingContext {
    fn gen_random(&mut self) -> u8 {
        rand::random::<u8>()
    }
}

fn load(rom: &[u8]) -> Chip8<TestingContext> {
    let _ = env_logger::builder().is_test(true).try_init();
    Builder::new()
        .with_context(TestingContext)
        .with_program(rom)
        .build()
        .unwrap()
}

fn run_to_end(chip: &mut Chip8<TestingContext>, limit: usize) -> usize {
    let mut cycles = 0;
    while chip.is_running() && cycles < limit {
        chip.step().unwrap();
        cycles += 1;
    }
    cycles
}

fn formatted(chip: &Chip8<TestingContext>) -> String {
    chip.frame()
        .rows()
        .map(|row| {
            row.iter()
                .map(|&px| if px == 1 { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn countdown_loop() {
    #[rustfmt::skip]
    let rom = [
        0x60, 0x0A, // 200: LD V0, 10
        0x61, 0x00, // 202: LD V1, 0
        0x71, 0x01, // 204: ADD V1, 1
        0x70, 0xFF, // 206: ADD V0, -1
        0x30, 0x00, // 208: SE V0, 0
        0x12, 0x04, // 20A: JP 0x204
    ];
    let mut chip = load(&rom);
    run_to_end(&mut chip, 1_000);

    assert_eq!(chip.status(), Status::Stopped);
    assert_eq!(chip.v(0), Ok(0));
    assert_eq!(chip.v(1), Ok(10));
    assert_eq!(chip.pc(), 0x20C);
}

#[test]
fn nested_subroutines_return_in_order() {
    #[rustfmt::skip]
    let rom = [
        0x22, 0x08, // 200: CALL 0x208
        0x62, 0x03, // 202: LD V2, 3
        0x12, 0x10, // 204: JP 0x210
        0x00, 0x00, // 206: padding
        0x22, 0x0E, // 208: CALL 0x20E
        0x00, 0xEE, // 20A: RET
        0x00, 0x00, // 20C: padding
        0x61, 0x01, // 20E: LD V1, 1   (falls into RET below)
        0x00, 0xEE, // 210: RET, reached again by the JP with an empty stack
    ];
    let mut chip = load(&rom);

    let mut trace = vec![];
    let result = loop {
        trace.push(chip.pc());
        if let Err(trap) = chip.step() {
            break trap;
        }
    };
    assert_eq!(
        trace,
        vec![0x200, 0x208, 0x20E, 0x210, 0x20A, 0x202, 0x204, 0x210],
    );
    assert_eq!(chip.v(1), Ok(1));
    assert_eq!(chip.v(2), Ok(3));
    assert_eq!(result.fault, Fault::StackUnderflow);
    assert_eq!(result.pc, 0x210);
    assert_eq!(chip.status(), Status::Stopped);
}

#[test]
fn bcd_of_register_drawn_with_font() {
    #[rustfmt::skip]
    let rom = [
        0x6A, 0x7B, // 200: LD VA, 123
        0xA3, 0x00, // 202: LD I, 0x300
        0xFA, 0x33, // 204: LD B, VA
        0xF2, 0x65, // 206: LD V2, [I]
        0x63, 0x00, // 208: LD V3, 0   (x)
        0x64, 0x00, // 20A: LD V4, 0   (y)
        0xF0, 0x29, // 20C: LD F, V0
        0xD3, 0x45, // 20E: DRW V3, V4, 5
        0x73, 0x05, // 210: ADD V3, 5
        0xF1, 0x29, // 212: LD F, V1
        0xD3, 0x45, // 214: DRW V3, V4, 5
        0x73, 0x05, // 216: ADD V3, 5
        0xF2, 0x29, // 218: LD F, V2
        0xD3, 0x45, // 21A: DRW V3, V4, 5
    ];
    let mut chip = load(&rom);
    run_to_end(&mut chip, 100);

    assert_eq!((chip.v(0), chip.v(1), chip.v(2)), (Ok(1), Ok(2), Ok(3)));
    assert_eq!(chip.v(0xF), Ok(0));
    assert!(chip.consume_redraw());

    let expected = [
        "..#..####.####",
        ".##.....#....#",
        "..#..####.####",
        "..#..#.......#",
        ".###.####.####",
    ];
    let screen = formatted(&chip);
    let lines: Vec<&str> = screen.lines().collect();
    assert_eq!(lines.len(), HEIGHT);
    for (line, want) in lines.iter().zip(expected.iter()) {
        assert_eq!(&line[..want.len()], *want, "\n{}", screen);
        assert_eq!(line.len(), WIDTH);
    }
    assert!(lines[5..].iter().all(|line| !line.contains('#')));
}

#[test]
fn random_opcodes_never_panic() {
    for _ in 0..200 {
        let rom: Vec<u8> = (0..64).map(|_| rand::random::<u8>()).collect();
        let mut chip = load(&rom);
        for _ in 0..256 {
            match chip.step() {
                Ok(()) => {}
                Err(trap) => {
                    assert!(!chip.is_running());
                    assert!(!format!("{}", trap).is_empty());
                    break;
                }
            }
            if chip.status() == Status::AwaitingKey {
                chip.set_key(rand::random::<u8>() & 0x0F, true).unwrap();
            }
        }
    }
}

#[test]
fn random_mask_applies() {
    // RND V0, 0x0F; JP 0x200
    let mut chip = load(&[0xC0, 0x0F, 0x12, 0x00]);
    for _ in 0..100 {
        chip.step().unwrap();
        assert_eq!(chip.v(0).unwrap() & 0xF0, 0);
        chip.step().unwrap();
    }
}

#[test]
fn key_wait_released_by_input_thread() {
    // LD V5, K; JP 0x202
    let chip = Arc::new(Mutex::new(load(&[0xF5, 0x0A, 0x12, 0x02])));
    let done = Arc::new(AtomicBool::new(false));
    let timeout = Duration::from_secs(5);

    thread::scope(|s| {
        let driver_chip = Arc::clone(&chip);
        let driver_done = Arc::clone(&done);
        s.spawn(move |_| {
            let started = Instant::now();
            while started.elapsed() < timeout {
                {
                    let mut chip = driver_chip.lock().unwrap();
                    chip.step().unwrap();
                    if chip.pc() == 0x202 {
                        driver_done.store(true, Ordering::Release);
                        break;
                    }
                }
                std::thread::yield_now();
            }
        });

        let input_chip = Arc::clone(&chip);
        s.spawn(move |_| {
            let started = Instant::now();
            while started.elapsed() < timeout {
                {
                    let mut chip = input_chip.lock().unwrap();
                    if chip.status() == Status::AwaitingKey {
                        chip.set_key(0xE, true).unwrap();
                        break;
                    }
                }
                std::thread::sleep(Duration::from_millis(1));
            }
        });
    })
    .unwrap();

    assert!(done.load(Ordering::Acquire));
    let chip = chip.lock().unwrap();
    assert_eq!(chip.v(5), Ok(0xE));
    assert_eq!(chip.status(), Status::Running);
}
