use kurbo::{Point, Vec2};
use promptboard_core::generation::{BoxFuture, GenerationResult};
use promptboard_core::{
    AppState, BoardError, CanvasItem, Event, GeneratedImage, GenerationError, GenerationRequest, GenerationType, ImageGenerator,
    ItemId, Notice, Outcome,
};
use std::cell::RefCell;
use std::sync::Mutex;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generator that records every prompt it receives.
#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
    fail_next: Mutex<bool>,
}

impl ImageGenerator for RecordingGenerator {
    fn generate(&self, request: &GenerationRequest) -> BoxFuture<'_, GenerationResult<GeneratedImage>> {
        let full_prompt = request.full_prompt();
        let prompt = request.prompt.clone();
        let kind = request.kind.clone();
        Box::pin(async move {
            let fail = std::mem::take(&mut *self.fail_next.lock().unwrap());
            self.prompts.lock().unwrap().push(full_prompt);
            if fail {
                return Err(GenerationError::Backend("rate limited".to_string()));
            }
            Ok(GeneratedImage {
                src: format!("https://img/{}.png", prompt.replace(' ', "-")),
                prompt,
                kind,
            })
        })
    }
}

/// Drives an app and a generator the way a host would.
struct Session {
    app: RefCell<AppState>,
    generator: RecordingGenerator,
}

impl Session {
    fn new() -> Self {
        init_logger();
        Self {
            app: RefCell::new(AppState::new()),
            generator: RecordingGenerator::default(),
        }
    }

    fn send(&self, event: Event) -> Outcome {
        let mut outcome = self.app.borrow_mut().handle(event);
        if let Some(request) = outcome.request.take() {
            let result = pollster::block_on(self.generator.generate(&request));
            let finished = self.app.borrow_mut().handle(Event::GenerationFinished(result));
            outcome.notices.extend(finished.notices);
        }
        outcome
    }

    fn position_of(&self, id: ItemId) -> Option<Point> {
        self.app.borrow().current_board().and_then(|b| b.position_of(id))
    }

    fn last_image(&self) -> ItemId {
        let app = self.app.borrow();
        let board = app.current_board().unwrap();
        board.images().last().map(|i| i.id()).unwrap()
    }
}

fn titles(outcome: &Outcome) -> Vec<String> {
    outcome.notices.iter().map(Notice::title).collect()
}

#[test]
fn test_generate_iterate_group_and_drag() {
    let session = Session::new();
    session.send(Event::CreateBoard { name: "B1".to_string() });

    // v1
    session.send(Event::OpenComposer {
        kind: GenerationType::new("image"),
    });
    let outcome = session.send(Event::SubmitPrompt {
        prompt: "cat".to_string(),
    });
    assert_eq!(titles(&outcome), vec!["Generating...", "Click to place image"]);
    let outcome = session.send(Event::CanvasClick {
        position: Point::new(900.0, 900.0),
    });
    assert_eq!(titles(&outcome), vec!["v1 placed"]);
    let v1 = session.last_image();
    assert_eq!(session.position_of(v1), Some(Point::new(100.0, 100.0)));

    // v2 iterates on v1
    session.send(Event::IterateFrom { image_id: v1 });
    session.send(Event::SubmitPrompt {
        prompt: "cat wearing hat".to_string(),
    });
    let outcome = session.send(Event::CanvasClick {
        position: Point::new(900.0, 900.0),
    });
    assert_eq!(titles(&outcome), vec!["v2 placed"]);
    let v2 = session.last_image();
    assert_eq!(session.position_of(v2), Some(Point::new(400.0, 100.0)));

    {
        let app = session.app.borrow();
        let image = app.current_board().unwrap().image(v2).unwrap();
        assert_eq!(image.version, 2);
        assert_eq!(image.base_prompt.as_deref(), Some("cat"));
        assert_eq!(image.lineage.transcript(), "v1: cat\nv2: cat wearing hat");
    }
    let prompts = session.generator.prompts.lock().unwrap().clone();
    assert_eq!(
        prompts,
        vec![
            "cat".to_string(),
            "Previous versions:\nv1: cat\n\nNew version: cat wearing hat".to_string(),
        ]
    );

    // Group both with a marquee.
    session.send(Event::PointerDown {
        position: Point::new(50.0, 50.0),
    });
    session.send(Event::PointerMove {
        position: Point::new(700.0, 300.0),
    });
    session.send(Event::PointerUp {
        position: Point::new(700.0, 300.0),
    });
    assert_eq!(session.app.borrow().selection(), &[v1, v2]);
    let outcome = session.send(Event::GroupSelection);
    assert_eq!(titles(&outcome), vec!["Group created"]);

    // Drag v1 by (+50, +20).
    let v2_before = session.position_of(v2).unwrap();
    session.send(Event::ItemPointerDown {
        id: v1,
        position: Point::new(120.0, 120.0),
    });
    session.send(Event::PointerMove {
        position: Point::new(170.0, 140.0),
    });
    session.send(Event::PointerUp {
        position: Point::new(170.0, 140.0),
    });

    assert_eq!(session.position_of(v1), Some(Point::new(150.0, 120.0)));
    assert_eq!(session.position_of(v2), Some(v2_before + Vec2::new(50.0, 20.0)));
}

#[test]
fn test_failure_does_not_advance_lineage() {
    let session = Session::new();
    session.send(Event::CreateBoard { name: "B1".to_string() });
    session.send(Event::OpenComposer {
        kind: GenerationType::new("image"),
    });

    *session.generator.fail_next.lock().unwrap() = true;
    let outcome = session.send(Event::SubmitPrompt {
        prompt: "cat".to_string(),
    });
    assert_eq!(titles(&outcome), vec!["Generating...", "Failed to generate"]);
    assert!(session.app.borrow().pending().is_none());
    assert!(session.app.borrow().current_board().unwrap().images().is_empty());

    // Composer is still open, so a retry goes straight through.
    let outcome = session.send(Event::SubmitPrompt {
        prompt: "cat".to_string(),
    });
    assert!(!outcome.has_error());
    assert_eq!(session.app.borrow().pending().map(|p| p.version), Some(1));
}

#[test]
fn test_unrelated_prompts_stack_downward() {
    let session = Session::new();
    session.send(Event::CreateBoard { name: "B1".to_string() });

    let mut ys = Vec::new();
    for prompt in ["cat", "dog", "bird"] {
        session.send(Event::OpenComposer {
            kind: GenerationType::new("image"),
        });
        session.send(Event::SubmitPrompt {
            prompt: prompt.to_string(),
        });
        session.send(Event::CanvasClick {
            position: Point::new(0.0, 0.0),
        });
        let id = session.last_image();
        ys.push(session.position_of(id).unwrap().y);
    }
    assert_eq!(ys, vec![100.0, 500.0, 900.0]);
}

#[test]
fn test_deleting_current_board_requires_new_selection() {
    let session = Session::new();
    session.send(Event::CreateBoard { name: "B1".to_string() });
    let id = session.app.borrow().current_id().unwrap();
    session.send(Event::DeleteBoard { id });

    session.send(Event::OpenComposer {
        kind: GenerationType::new("image"),
    });
    let outcome = session.send(Event::SubmitPrompt {
        prompt: "cat".to_string(),
    });
    assert_eq!(outcome.notices, vec![Notice::Failed(BoardError::NoCurrentBoard)]);
    assert!(session.generator.prompts.lock().unwrap().is_empty());
}
