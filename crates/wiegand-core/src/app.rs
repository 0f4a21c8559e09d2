//! Editor application: shared state, input queue, and the dispatch loop.
//!
//! The input source and the display surface run on different contexts on the
//! device, so the [`FieldEditor`] lives behind a single blocking mutex. Every
//! read (snapshots for rendering) and every write (key handling) goes through
//! [`EditorApp::lock`], which holds the lock for the duration of a closure and
//! releases it on every exit path.
//!
//! Key events reach the loop through a bounded channel. The input callback
//! calls [`EditorApp::post_input`], which never blocks. The loop either drains
//! the queue each frame with [`EditorApp::process_pending`] or awaits events
//! with [`EditorApp::run`].
//!
//! Dropping the app drops the editor, which stops the indicator if it is
//! still running.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info, warn};

use crate::config::INPUT_QUEUE_DEPTH;
use crate::editor::{FieldEditor, Snapshot};
use crate::indicator::IndicatorSink;
use crate::input::{InputEvent, KeyAction};

/// Whether the loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The code editor application.
pub struct EditorApp<S: IndicatorSink> {
    editor: Mutex<CriticalSectionRawMutex, RefCell<FieldEditor<S>>>,
    inputs: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>,
}

impl<S: IndicatorSink> EditorApp<S> {
    pub fn new(indicator: S) -> Self {
        Self {
            editor: Mutex::new(RefCell::new(FieldEditor::new(indicator))),
            inputs: Channel::new(),
        }
    }

    /// Run `f` with exclusive access to the editor.
    ///
    /// Must not be called from inside another `lock` closure.
    pub fn lock<R>(&self, f: impl FnOnce(&mut FieldEditor<S>) -> R) -> R {
        self.editor.lock(|editor| f(&mut editor.borrow_mut()))
    }

    /// Render read of the editor state.
    pub fn snapshot(&self) -> Snapshot {
        self.lock(|editor| editor.render_snapshot())
    }

    /// Queue a key event from the input source.
    ///
    /// Returns `false` if the queue is full and the event was dropped.
    pub fn post_input(&self, event: InputEvent) -> bool {
        match self.inputs.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                warn!("Input queue full, dropping {:?}", event);
                false
            }
        }
    }

    /// Apply a single key event.
    pub fn handle_event(&self, event: InputEvent) -> Control {
        match event.action() {
            None => Control::Continue,
            Some(KeyAction::Exit) => {
                info!("Back pressed, leaving editor");
                Control::Exit
            }
            Some(KeyAction::Edit(command)) => {
                debug!("Applying {:?}", command);
                self.lock(|editor| editor.apply(command));
                Control::Continue
            }
        }
    }

    /// Handle every queued event without blocking.
    ///
    /// Stops at the first exit request and leaves later events queued.
    pub fn process_pending(&self) -> Control {
        while let Ok(event) = self.inputs.try_receive() {
            if self.handle_event(event) == Control::Exit {
                return Control::Exit;
            }
        }
        Control::Continue
    }

    /// Await and handle events until Back is pressed.
    ///
    /// `on_frame` receives a fresh snapshot after every event, including the
    /// one that ends the loop.
    pub async fn run<F: FnMut(&Snapshot)>(&self, mut on_frame: F) {
        loop {
            let event = self.inputs.receive().await;
            let control = self.handle_event(event);
            on_frame(&self.snapshot());
            if control == Control::Exit {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::code::{CODE_LEN, CardCode};
    use crate::indicator::{IndicatorCommand, RecordingSink};
    use crate::input::{InputKey, InputType};
    use alloc::vec::Vec;

    fn press_all<S: IndicatorSink>(app: &EditorApp<S>, keys: &[InputKey]) -> Control {
        let mut control = Control::Continue;
        for key in keys {
            control = app.handle_event(InputEvent::press(*key));
        }
        control
    }

    #[test]
    fn test_edit_and_start_scenario() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        press_all(
            &app,
            &[
                InputKey::Up,
                InputKey::Up,
                InputKey::Right,
                InputKey::Up,
                InputKey::Ok,
            ],
        );

        app.lock(|editor| {
            assert_eq!(*editor.code(), "210000".parse::<CardCode>().unwrap());
            assert_eq!(editor.cursor().get(), 1);
            assert!(editor.is_active());
            assert_eq!(editor.indicator().commands, [IndicatorCommand::Start]);
        });
    }

    #[test]
    fn test_wrap_at_last_digit_scenario() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);

        press_all(&app, &[InputKey::Left]);
        assert_eq!(app.snapshot().cursor, CODE_LEN - 1);

        press_all(&app, &[InputKey::Down]);
        let snapshot = app.snapshot();
        assert_eq!(snapshot.digits, ['0', '0', '0', '0', '0', 'F']);
        assert_eq!(snapshot.cursor, 5);

        press_all(&app, &[InputKey::Left; 4]);
        assert_eq!(app.snapshot().cursor, 1);
    }

    #[test]
    fn test_teardown_stops_active_indicator() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        press_all(&app, &[InputKey::Ok]);
        drop(app);
        assert_eq!(
            sink.commands,
            [IndicatorCommand::Start, IndicatorCommand::Stop]
        );
    }

    #[test]
    fn test_teardown_when_idle_sends_nothing() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        press_all(&app, &[InputKey::Ok, InputKey::Up, InputKey::Ok]);
        drop(app);
        assert_eq!(
            sink.commands,
            [IndicatorCommand::Start, IndicatorCommand::Stop]
        );
    }

    #[test]
    fn test_back_exits_without_touching_state() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        let before = app.snapshot();
        assert_eq!(press_all(&app, &[InputKey::Back]), Control::Exit);
        assert_eq!(app.snapshot(), before);
    }

    #[test]
    fn test_only_press_events_edit() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        for kind in [InputType::Release, InputType::Long, InputType::Repeat] {
            assert_eq!(
                app.handle_event(InputEvent::new(InputKey::Up, kind)),
                Control::Continue
            );
            assert_eq!(
                app.handle_event(InputEvent::new(InputKey::Back, kind)),
                Control::Continue
            );
        }
        assert_eq!(app.snapshot().digits, ['0'; CODE_LEN]);
    }

    #[test]
    fn test_process_pending_stops_at_back() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        assert!(app.post_input(InputEvent::press(InputKey::Up)));
        assert!(app.post_input(InputEvent::press(InputKey::Back)));
        assert!(app.post_input(InputEvent::press(InputKey::Up)));

        assert_eq!(app.process_pending(), Control::Exit);
        assert_eq!(app.snapshot().digits[0], '1');

        // The event after Back is still queued.
        assert_eq!(app.process_pending(), Control::Continue);
        assert_eq!(app.snapshot().digits[0], '2');
    }

    #[test]
    fn test_full_queue_drops_events() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        for _ in 0..INPUT_QUEUE_DEPTH {
            assert!(app.post_input(InputEvent::press(InputKey::Up)));
        }
        assert!(!app.post_input(InputEvent::press(InputKey::Up)));

        assert_eq!(app.process_pending(), Control::Continue);
        assert_eq!(app.snapshot().digits[0], '8');
    }

    #[test]
    fn test_run_reports_frames_until_back() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);
        for key in [InputKey::Down, InputKey::Ok, InputKey::Back] {
            app.post_input(InputEvent::press(key));
        }

        let mut frames = Vec::new();
        embassy_futures::block_on(app.run(|snapshot| frames.push(*snapshot)));

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].digits[0], 'F');
        assert!(!frames[0].active);
        assert!(frames[1].active);
        assert_eq!(frames[2], frames[1]);

        drop(app);
        assert_eq!(
            sink.commands,
            [IndicatorCommand::Start, IndicatorCommand::Stop]
        );
    }

    #[test]
    fn test_render_reads_never_see_torn_state() {
        let mut sink = RecordingSink::default();
        let app = EditorApp::new(&mut sink);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..500 {
                    // Each pair nets to zero, so only a torn read could see a
                    // non-zero digit.
                    app.lock(|editor| {
                        editor.move_cursor_right();
                        editor.increment_at_cursor();
                        editor.decrement_at_cursor();
                    });
                }
            });
            scope.spawn(|| {
                for _ in 0..500 {
                    let snapshot = app.snapshot();
                    assert_eq!(snapshot.digits, ['0'; CODE_LEN]);
                }
            });
        });
    }
}
