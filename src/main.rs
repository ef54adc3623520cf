use log::error;
use octo8::{cli, input, Beeper, Desktop, Interpreter, Scheduler, Screen};
use std::time::{Duration, Instant};
use winit::{
    event::Event,
    event_loop::{ControlFlow, EventLoop},
};
use winit_input_helper::WinitInputHelper;

fn main() {
    let cli = cli::init();

    let mut interpreter = Interpreter::new();
    if let Err(e) = interpreter.load_rom_file(&cli.path) {
        error!("{e}");
        std::process::exit(1);
    }

    let event_loop = EventLoop::new();
    let screen = Screen::new(&event_loop, cli.scale).unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1)
    });
    let beeper = (!cli.mute).then(Beeper::new);
    let mut desktop = Desktop::new(screen, beeper);
    let mut scheduler = Scheduler::new(cli.hz);
    let mut helper = WinitInputHelper::new();

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            if let Err(e) = desktop.screen.render() {
                error!("{e}");
                *control_flow = ControlFlow::ExitWithCode(1);
                return;
            }
        }

        if helper.update(&event) {
            if input::quit_requested(&helper) {
                *control_flow = ControlFlow::Exit;
                return;
            }

            if let Some(size) = helper.window_resized() {
                if let Err(e) = desktop.screen.resize(size) {
                    error!("{e}");
                    *control_flow = ControlFlow::ExitWithCode(1);
                    return;
                }
            }

            desktop.queue_keys(&helper);
            let now = Instant::now();
            if let Err(e) = scheduler.update(&mut interpreter, &mut desktop, now) {
                error!("{e}");
                *control_flow = ControlFlow::ExitWithCode(1);
                return;
            }
            *control_flow = ControlFlow::WaitUntil(now + Duration::from_millis(1));
        }
    });
}
