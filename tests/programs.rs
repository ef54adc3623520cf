use octo8::{font, Error, Framebuffer, Host, Interpreter, KeyEvent, Result, Scheduler};
use std::{collections::VecDeque, time::Duration};

#[derive(Default)]
struct Recorder {
    keys: VecDeque<KeyEvent>,
    frames: Vec<Vec<bool>>,
    tones: Vec<bool>,
}

impl Host for Recorder {
    fn poll_key(&mut self) -> Option<KeyEvent> {
        self.keys.pop_front()
    }

    fn present(&mut self, framebuffer: &Framebuffer) -> Result<()> {
        self.frames.push(framebuffer.iter().collect());
        Ok(())
    }

    fn set_tone(&mut self, on: bool) {
        self.tones.push(on);
    }
}

fn boot(program: &[u8]) -> Interpreter {
    let mut interpreter = Interpreter::with_seed(42);
    interpreter.load_rom(program).unwrap();
    interpreter
}

/// Asserts that the 4x5 `glyph` is drawn at `(x, y)`.
fn assert_glyph(framebuffer: &Framebuffer, x: usize, y: usize, glyph: &[u8]) {
    for (row, byte) in glyph.iter().enumerate() {
        for column in 0..4 {
            let expected = byte & (0x80 >> column) != 0;
            assert_eq!(
                framebuffer.pixel(x + column, y + row),
                expected,
                "pixel ({}, {})",
                x + column,
                y + row
            );
        }
    }
}

#[test]
fn draws_digit_two() {
    // LD VA, 02; LD F, VA; DRW V0, VB, 5
    let mut interpreter = boot(&[0x6A, 0x02, 0xFA, 0x29, 0xD0, 0xB5]);
    for _ in 0..3 {
        interpreter.step().unwrap();
    }
    let framebuffer = interpreter.framebuffer();
    assert_glyph(framebuffer, 0, 0, &[0xF0, 0x10, 0xF0, 0x80, 0xF0]);
    assert_eq!(framebuffer.iter().filter(|&on| on).count(), 14);
    assert_eq!(interpreter.registers()[0xF], 0);
}

#[test]
fn draws_digit_two_through_scheduler() {
    let mut interpreter = boot(&[0x6A, 0x02, 0xFA, 0x29, 0xD0, 0xB5, 0x12, 0x06]);
    let mut host = Recorder::default();
    let mut scheduler = Scheduler::default();
    scheduler
        .advance(&mut interpreter, &mut host, Duration::from_millis(20))
        .unwrap();
    assert_eq!(host.frames.len(), 1);
    let lit = host.frames[0].iter().filter(|&&on| on).count();
    assert_eq!(lit, 14);
}

#[test]
fn prints_bcd_digits() {
    // V0 = 137; I = 300; LD B, V0; LD V2, [I]
    // then draw V0..=V2 as glyphs at x = 0, 5, 10
    let program = [
        0x60, 0x89, // LD V0, 137
        0xA3, 0x00, // LD I, 300
        0xF0, 0x33, // LD B, V0
        0xF2, 0x65, // LD V2, [I]
        0x63, 0x00, // LD V3, 0   (x)
        0x64, 0x00, // LD V4, 0   (y)
        0xF0, 0x29, // LD F, V0
        0xD3, 0x45, // DRW V3, V4, 5
        0x73, 0x05, // ADD V3, 5
        0xF1, 0x29, // LD F, V1
        0xD3, 0x45, // DRW V3, V4, 5
        0x73, 0x05, // ADD V3, 5
        0xF2, 0x29, // LD F, V2
        0xD3, 0x45, // DRW V3, V4, 5
    ];
    let mut interpreter = boot(&program);
    for _ in 0..program.len() / 2 {
        interpreter.step().unwrap();
    }
    assert_eq!(&interpreter.registers()[..3], &[1, 3, 7]);
    assert_eq!(&interpreter.memory()[0x300..0x303], &[1, 3, 7]);

    let framebuffer = interpreter.framebuffer();
    assert_glyph(framebuffer, 0, 0, &font::FONT[5..10]);
    assert_glyph(framebuffer, 5, 0, &font::FONT[15..20]);
    assert_glyph(framebuffer, 10, 0, &font::FONT[35..40]);
    assert_eq!(interpreter.registers()[0xF], 0);
}

#[test]
fn subroutine_counts_in_loop() {
    // 200: V0 = 0
    // 202: CALL 20A
    // 204: SE V0, 05
    // 206: JP 202
    // 208: JP 208
    // 20A: ADD V0, 1
    // 20C: RET
    let mut interpreter = boot(&[
        0x60, 0x00, 0x22, 0x0A, 0x30, 0x05, 0x12, 0x02, 0x12, 0x08, 0x70, 0x01, 0x00, 0xEE,
    ]);
    let mut host = Recorder::default();
    let mut scheduler = Scheduler::default();
    scheduler
        .advance(&mut interpreter, &mut host, Duration::from_millis(100))
        .unwrap();
    assert_eq!(interpreter.registers()[0], 5);
    assert_eq!(interpreter.pc(), 0x208);
    assert!(interpreter.stack().is_empty());
}

#[test]
fn key_wait_suspends_until_key_down() {
    // LD V1, K; LD F, V1; DRW V0, V0, 5; JP 206
    let mut interpreter = boot(&[0xF1, 0x0A, 0xF1, 0x29, 0xD0, 0x05, 0x12, 0x06]);
    let mut host = Recorder::default();
    let mut scheduler = Scheduler::default();

    for _ in 0..10 {
        scheduler
            .advance(&mut interpreter, &mut host, Duration::from_millis(10))
            .unwrap();
    }
    assert!(interpreter.keypad().is_waiting());
    assert!(host.frames.is_empty());

    host.keys.push_back(KeyEvent { key: 0xE, pressed: true });
    host.keys.push_back(KeyEvent { key: 0xE, pressed: false });
    scheduler
        .advance(&mut interpreter, &mut host, Duration::from_millis(10))
        .unwrap();
    assert_eq!(interpreter.registers()[1], 0xE);
    assert!(!interpreter.keypad().is_pressed(0xE));
    assert_eq!(host.frames.len(), 1);
    assert_glyph(interpreter.framebuffer(), 0, 0, &font::FONT[70..75]);
}

#[test]
fn delay_timer_loop_takes_real_time() {
    // V0 = 30; LD DT, V0
    // 204: LD V1, DT; SE V1, 0; JP 204
    // 20A: JP 20A
    let mut interpreter = boot(&[
        0x60, 0x1E, 0xF0, 0x15, 0xF1, 0x07, 0x31, 0x00, 0x12, 0x04, 0x12, 0x0A,
    ]);
    let mut host = Recorder::default();
    let mut scheduler = Scheduler::default();

    // 30 ticks at 60 Hz is half a second
    let mut elapsed = Duration::ZERO;
    while interpreter.pc() != 0x20A && elapsed < Duration::from_secs(2) {
        scheduler
            .advance(&mut interpreter, &mut host, Duration::from_millis(10))
            .unwrap();
        elapsed += Duration::from_millis(10);
    }
    assert!(elapsed >= Duration::from_millis(490));
    assert!(elapsed <= Duration::from_millis(520));
}

#[test]
fn sound_timer_drives_tone() {
    // V0 = 6; LD ST, V0; JP 204
    let mut interpreter = boot(&[0x60, 0x06, 0xF0, 0x18, 0x12, 0x04]);
    let mut host = Recorder::default();
    let mut scheduler = Scheduler::default();
    scheduler
        .advance(&mut interpreter, &mut host, Duration::from_millis(5))
        .unwrap();
    assert_eq!(host.tones, vec![true]);
    for _ in 0..20 {
        scheduler
            .advance(&mut interpreter, &mut host, Duration::from_millis(10))
            .unwrap();
    }
    assert_eq!(host.tones, vec![true, false]);
}

#[test]
fn runaway_recursion_is_fatal() {
    // 200: CALL 200
    let mut interpreter = boot(&[0x22, 0x00]);
    let mut host = Recorder::default();
    let mut scheduler = Scheduler::default();
    let result = scheduler.advance(&mut interpreter, &mut host, Duration::from_millis(100));
    assert!(matches!(result, Err(Error::StackOverflow { pc: 0x200 })));
    assert_eq!(interpreter.stack().len(), Interpreter::STACK_SIZE);
}

#[test]
fn unknown_instructions_are_skipped() {
    // 0123; 5121; V2 = 9
    let mut interpreter = boot(&[0x01, 0x23, 0x51, 0x21, 0x62, 0x09]);
    for _ in 0..3 {
        interpreter.step().unwrap();
    }
    assert_eq!(interpreter.registers()[2], 9);
    assert_eq!(interpreter.pc(), 0x206);
}

#[test]
fn oversized_rom_is_rejected() {
    let mut interpreter = Interpreter::with_seed(0);
    let rom = vec![0u8; Interpreter::MAX_ROM_SIZE + 1];
    assert!(matches!(
        interpreter.load_rom(&rom),
        Err(Error::CapacityExceeded { .. })
    ));
    assert!(interpreter.memory()[0x200..].iter().all(|&b| b == 0));
}
