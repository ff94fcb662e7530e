//! Application state machine.
//!
//! [`AppState`] owns every board and the transient UI state around them.
//! The host feeds it [`Event`]s and gets back an [`Outcome`]: notices to
//! show, and at most one [`GenerationRequest`] to run through an
//! [`ImageGenerator`](crate::generation::ImageGenerator). The generator's
//! result comes back as [`Event::GenerationFinished`].

use crate::board::{Board, BoardId};
use crate::config::BoardConfig;
use crate::drag::{move_item, DragState};
use crate::error::{BoardError, BoardResult};
use crate::event::{Event, Key};
use crate::generation::{GeneratedImage, GenerationError, GenerationRequest};
use crate::interaction::{Gesture, Interaction};
use crate::items::{CanvasImage, CanvasText, GenerationType, ItemId};
use crate::lineage::Lineage;
use crate::placement::{next_version, placement_position, suggested_position};
use crate::selection::Marquee;
use crate::time::now_millis;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prompt entry dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composer {
    /// Generation type tag for the request.
    pub kind: GenerationType,
    /// Prompt pre-filled in the input.
    pub seed_prompt: String,
    /// Root prompt when iterating on an image.
    pub base_prompt: Option<String>,
    /// Lineage of the image being iterated on.
    pub history: Lineage,
}

impl Composer {
    /// Composer for a brand-new lineage.
    pub fn fresh(kind: GenerationType) -> Self {
        Self {
            kind,
            seed_prompt: String::new(),
            base_prompt: None,
            history: Lineage::new(),
        }
    }

    /// Composer seeded from an existing image.
    pub fn iterate(image: &CanvasImage) -> Self {
        Self {
            kind: image.kind.clone(),
            seed_prompt: image.prompt.clone(),
            base_prompt: Some(image.lineage_key().to_string()),
            history: image.lineage.clone(),
        }
    }

    pub fn is_iteration(&self) -> bool {
        self.base_prompt.is_some()
    }
}

/// A generated image waiting for the user to click it into place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingImage {
    /// Board that was current when the prompt was submitted.
    pub board_id: BoardId,
    pub src: String,
    pub kind: GenerationType,
    pub prompt: String,
    pub base_prompt: Option<String>,
    /// Version computed when the result arrived.
    pub version: u32,
    /// Spawn position computed when the result arrived.
    pub suggested_position: Point,
    /// Lineage before this generation.
    pub prior: Lineage,
    /// Lineage including this generation.
    pub lineage: Lineage,
    pub timestamp: u64,
}

impl PendingImage {
    fn lineage_key(&self) -> &str {
        self.base_prompt.as_deref().unwrap_or(&self.prompt)
    }
}

/// User-facing notification. The host decides how to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    BoardCreated { name: String },
    BoardRenamed { name: String },
    BoardDeleted { name: String },
    Generating,
    ClickToPlace { version: u32 },
    Placed { version: u32 },
    GroupCreated { members: usize },
    Failed(BoardError),
}

impl Notice {
    /// Short headline.
    pub fn title(&self) -> String {
        match self {
            Notice::BoardCreated { .. } => "Board created".to_string(),
            Notice::BoardRenamed { .. } => "Board renamed".to_string(),
            Notice::BoardDeleted { .. } => "Board deleted".to_string(),
            Notice::Generating => "Generating...".to_string(),
            Notice::ClickToPlace { .. } => "Click to place image".to_string(),
            Notice::Placed { version } => format!("v{} placed", version),
            Notice::GroupCreated { .. } => "Group created".to_string(),
            Notice::Failed(BoardError::GenerationFailed(_)) => "Failed to generate".to_string(),
            Notice::Failed(err) => err.to_string(),
        }
    }

    /// Optional detail line.
    pub fn description(&self) -> Option<String> {
        match self {
            Notice::BoardCreated { name } | Notice::BoardRenamed { name } | Notice::BoardDeleted { name } => {
                Some(name.clone())
            }
            Notice::ClickToPlace { version } => Some(format!("Version {} is ready", version)),
            Notice::GroupCreated { members } => Some(format!("{} items grouped", members)),
            Notice::Failed(BoardError::GenerationFailed(err)) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Failed(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// What the host has to do after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    /// Generation to start, if the event submitted a prompt.
    pub request: Option<GenerationRequest>,
}

impl Outcome {
    /// Whether any notice reports a failure.
    pub fn has_error(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// A request the host is running, tied to the board it was submitted on.
#[derive(Debug, Clone)]
struct InFlight {
    board_id: BoardId,
    request: GenerationRequest,
}

/// The whole application: boards plus the state around the current one.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    config: BoardConfig,
    boards: Vec<Board>,
    current: Option<BoardId>,
    composer: Option<Composer>,
    in_flight: Option<InFlight>,
    pending: Option<PendingImage>,
    interaction: Interaction,
}

/// Pure transition: consume a state and an event, return the next state.
pub fn reduce(mut state: AppState, event: Event) -> (AppState, Outcome) {
    let outcome = state.handle(event);
    (state, outcome)
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// All boards in creation order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn current_id(&self) -> Option<BoardId> {
        self.current
    }

    pub fn current_board(&self) -> Option<&Board> {
        self.current.and_then(|id| self.board(id))
    }

    pub fn composer(&self) -> Option<&Composer> {
        self.composer.as_ref()
    }

    /// The request the host is currently running, if any.
    pub fn in_flight(&self) -> Option<&GenerationRequest> {
        self.in_flight.as_ref().map(|f| &f.request)
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending(&self) -> Option<&PendingImage> {
        self.pending.as_ref()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Selected item IDs on the current board.
    pub fn selection(&self) -> &[ItemId] {
        self.interaction.selected()
    }

    /// Apply one event.
    ///
    /// Failures never escape: they are logged and reported as a
    /// [`Notice::Failed`], and the state stays consistent.
    pub fn handle(&mut self, event: Event) -> Outcome {
        let mut outcome = Outcome::default();
        if let Err(err) = self.dispatch(event, &mut outcome) {
            log::warn!("{}", err);
            outcome.notify(Notice::Failed(err));
        }
        outcome
    }

    fn dispatch(&mut self, event: Event, out: &mut Outcome) -> BoardResult<()> {
        match event {
            Event::CreateBoard { name } => {
                self.create_board(name, out);
                Ok(())
            }
            Event::RenameBoard { id, name } => self.rename_board(id, name, out),
            Event::DeleteBoard { id } => self.delete_board(id, out),
            Event::SelectBoard { id } => self.select_board(id),

            Event::OpenComposer { kind } => {
                self.composer = Some(Composer::fresh(kind));
                Ok(())
            }
            Event::IterateFrom { image_id } => self.iterate_from(image_id),
            Event::CloseComposer => {
                self.composer = None;
                Ok(())
            }
            Event::SubmitPrompt { prompt } => self.submit_prompt(prompt, out),
            Event::GenerationFinished(result) => self.finish_generation(result, out),

            Event::BeginTextPlacement => {
                self.current_index()?;
                self.interaction.set_text_tool(true);
                Ok(())
            }
            Event::CanvasClick { position } => self.canvas_click(position, out),
            Event::PointerDown { position } => {
                self.pointer_down(position);
                Ok(())
            }
            Event::ItemPointerDown { id, position } => {
                self.item_pointer_down(id, position);
                Ok(())
            }
            Event::PointerMove { position } => {
                self.pointer_move(position);
                Ok(())
            }
            Event::PointerUp { .. } => {
                self.interaction.end_gesture();
                Ok(())
            }
            Event::MoveItem { id, position } => {
                if let Some(board) = self.current_board_mut() {
                    move_item(board, id, position);
                }
                Ok(())
            }
            Event::GroupSelection => self.group_selection(out),
            Event::ClearSelection => {
                self.interaction.clear_selection();
                Ok(())
            }

            Event::EditText { id, content } => {
                if let Some(text) = self.current_text_mut(id) {
                    text.set_content(content);
                }
                Ok(())
            }
            Event::SetFontSize { id, size } => {
                if let Some(text) = self.current_text_mut(id) {
                    text.font_size = size;
                }
                Ok(())
            }
            Event::DoubleClickText { id } => {
                if let Some(text) = self.current_text_mut(id) {
                    text.editing = true;
                }
                Ok(())
            }
            Event::TextKey { id, key } => {
                self.text_key(id, key);
                Ok(())
            }
            Event::TextBlur { id } => {
                self.text_blur(id);
                Ok(())
            }
        }
    }

    fn current_index(&self) -> BoardResult<usize> {
        let id = self.current.ok_or(BoardError::NoCurrentBoard)?;
        self.boards
            .iter()
            .position(|b| b.id == id)
            .ok_or(BoardError::NoCurrentBoard)
    }

    fn current_board_mut(&mut self) -> Option<&mut Board> {
        let id = self.current?;
        self.boards.iter_mut().find(|b| b.id == id)
    }

    fn current_text_mut(&mut self, id: ItemId) -> Option<&mut CanvasText> {
        self.current_board_mut()?.text_mut(id)
    }

    // Boards

    fn create_board(&mut self, name: String, out: &mut Outcome) -> BoardId {
        let board = Board::new(name);
        let id = board.id;
        log::info!("Created board {} ({})", board.name, id);
        out.notify(Notice::BoardCreated {
            name: board.name.clone(),
        });
        self.boards.push(board);
        self.switch_to(Some(id));
        id
    }

    fn rename_board(&mut self, id: BoardId, name: String, out: &mut Outcome) -> BoardResult<()> {
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BoardError::BoardNotFound(id))?;
        log::info!("Renamed board {} to {}", id, name);
        board.name = name.clone();
        out.notify(Notice::BoardRenamed { name });
        Ok(())
    }

    fn delete_board(&mut self, id: BoardId, out: &mut Outcome) -> BoardResult<()> {
        let index = self
            .boards
            .iter()
            .position(|b| b.id == id)
            .ok_or(BoardError::BoardNotFound(id))?;
        let board = self.boards.remove(index);
        log::info!("Deleted board {} ({} items)", id, board.len());
        if self.current == Some(id) {
            self.switch_to(None);
        }
        out.notify(Notice::BoardDeleted { name: board.name });
        Ok(())
    }

    fn select_board(&mut self, id: BoardId) -> BoardResult<()> {
        if self.board(id).is_none() {
            return Err(BoardError::BoardNotFound(id));
        }
        if self.current != Some(id) {
            log::debug!("Switched to board {}", id);
            self.switch_to(Some(id));
        }
        Ok(())
    }

    /// Change the current board.
    ///
    /// An iterating composer is dropped: its lineage belongs to the board the
    /// image lives on. A fresh composer stays open.
    fn switch_to(&mut self, id: Option<BoardId>) {
        self.current = id;
        self.interaction.reset();
        if self.composer.as_ref().is_some_and(Composer::is_iteration) {
            log::debug!("Closing iteration composer after board switch");
            self.composer = None;
        }
    }

    // Generation

    fn iterate_from(&mut self, image_id: ItemId) -> BoardResult<()> {
        let index = self.current_index()?;
        if let Some(image) = self.boards[index].image(image_id) {
            self.composer = Some(Composer::iterate(image));
        }
        Ok(())
    }

    fn submit_prompt(&mut self, prompt: String, out: &mut Outcome) -> BoardResult<()> {
        let index = self.current_index()?;
        if self.in_flight.is_some() || self.pending.is_some() {
            return Err(BoardError::GenerationInProgress);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            log::debug!("Ignoring empty prompt");
            return Ok(());
        }
        let Some(composer) = self.composer.as_ref() else {
            log::warn!("Prompt submitted without an open composer");
            return Ok(());
        };

        let request = GenerationRequest::new(prompt, composer.kind.clone())
            .with_history(composer.base_prompt.clone(), composer.history.clone());
        log::info!(
            "Requesting generation for \"{}\" ({} prior versions)",
            request.prompt,
            request.history.len()
        );
        self.in_flight = Some(InFlight {
            board_id: self.boards[index].id,
            request: request.clone(),
        });
        out.request = Some(request);
        out.notify(Notice::Generating);
        Ok(())
    }

    fn finish_generation(
        &mut self,
        result: Result<GeneratedImage, GenerationError>,
        out: &mut Outcome,
    ) -> BoardResult<()> {
        let Some(InFlight { board_id, request }) = self.in_flight.take() else {
            log::warn!("Discarding generation result with no request in flight");
            return Ok(());
        };
        let image = result.and_then(GeneratedImage::validate)?;

        let layout = &self.config.layout;
        let key = request.lineage_key();
        let base = request.base_prompt.as_deref();
        let (version, position) = match self.board(board_id) {
            Some(board) => (next_version(board, key), suggested_position(board, base, layout)),
            None => (1, Point::new(layout.left_margin, layout.top_margin)),
        };

        let timestamp = now_millis();
        let lineage = request.history.extended(request.prompt.clone(), version, timestamp);
        log::info!("Generated v{} of \"{}\"", version, key);

        self.pending = Some(PendingImage {
            board_id,
            src: image.src,
            kind: image.kind,
            prompt: request.prompt,
            base_prompt: request.base_prompt,
            version,
            suggested_position: position,
            prior: request.history,
            lineage,
            timestamp,
        });
        self.composer = None;
        out.notify(Notice::ClickToPlace { version });
        Ok(())
    }

    // Canvas

    fn canvas_click(&mut self, position: Point, out: &mut Outcome) -> BoardResult<()> {
        if let Some(pending) = self.pending.take() {
            return match self.current_index() {
                Ok(index) => {
                    self.place_pending(index, pending, position, out);
                    Ok(())
                }
                Err(err) => {
                    self.pending = Some(pending);
                    Err(err)
                }
            };
        }
        if self.interaction.text_tool_armed() {
            let index = self.current_index()?;
            let id = self.boards[index].add_text(CanvasText::placeholder(position));
            log::info!("Created text {} at ({}, {})", id, position.x, position.y);
            self.interaction.set_text_tool(false);
        }
        Ok(())
    }

    /// Put the pending image on the board at `index`.
    ///
    /// Version and spawn position are recomputed against the board as it is
    /// now, since items may have been added or moved since the result arrived.
    /// An iteration placed on a board other than its own starts a new lineage
    /// there, so versions within a lineage keep increasing from 1.
    fn place_pending(&mut self, index: usize, mut pending: PendingImage, click: Point, out: &mut Outcome) {
        let board = &mut self.boards[index];
        if pending.board_id != board.id && pending.base_prompt.is_some() {
            log::info!(
                "Iteration \"{}\" placed away from its board; starting a new lineage",
                pending.prompt
            );
            pending.base_prompt = None;
            pending.prior = Lineage::new();
        }

        let key = pending.lineage_key();
        let version = next_version(board, key);
        let suggested = suggested_position(board, pending.base_prompt.as_deref(), &self.config.layout);
        let lineage = pending.prior.extended(pending.prompt.clone(), version, pending.timestamp);
        let position = placement_position(self.config.placement, suggested, click);

        let image = CanvasImage::new(pending.src, pending.kind, pending.prompt, version, position)
            .with_base_prompt(pending.base_prompt)
            .with_lineage(lineage);
        let id = board.add_image(image);
        log::info!("Placed v{} ({}) at ({}, {})", version, id, position.x, position.y);
        out.notify(Notice::Placed { version });
    }

    fn pointer_down(&mut self, position: Point) {
        if self.current_board().is_none() {
            return;
        }
        if self.pending.is_some() || self.interaction.text_tool_armed() {
            return;
        }
        log::debug!("Marquee started at ({}, {})", position.x, position.y);
        self.interaction.clear_selection();
        self.interaction.begin_marquee(Marquee::new(position));
    }

    fn item_pointer_down(&mut self, id: ItemId, position: Point) {
        let Some(board) = self.current_board() else {
            return;
        };
        if board.text(id).is_some_and(|t| t.editing) {
            return;
        }
        if let Some(origin) = board.position_of(id) {
            self.interaction.begin_drag(DragState::new(id, origin, position));
        }
    }

    fn pointer_move(&mut self, position: Point) {
        let thumbnail_size = self.config.thumbnail_size;
        let Some(index) = self.current_index().ok() else {
            return;
        };
        let board = &mut self.boards[index];

        let hits = match self.interaction.gesture_mut() {
            Gesture::Idle => None,
            Gesture::Marquee(marquee) => {
                marquee.current = position;
                Some(marquee.hits(board, thumbnail_size))
            }
            Gesture::Drag(drag) => {
                let origin = drag.update(position);
                move_item(board, drag.item_id, origin);
                None
            }
        };
        // Selection is recomputed from scratch on every sample.
        if let Some(hits) = hits {
            self.interaction.set_selection(hits);
        }
    }

    fn group_selection(&mut self, out: &mut Outcome) -> BoardResult<()> {
        let index = self.current_index()?;
        let selected = self.interaction.selected();
        if selected.len() < self.config.min_group_size {
            log::debug!("Not grouping {} selected items", selected.len());
            return Ok(());
        }

        let board = &mut self.boards[index];
        if let Some(group_id) = board.group_items(selected) {
            let members = board.group_members(group_id).len();
            out.notify(Notice::GroupCreated { members });
        }
        self.interaction.clear_selection();
        Ok(())
    }

    // Text editing

    fn text_key(&mut self, id: ItemId, key: Key) {
        let Some(text) = self.current_text_mut(id) else {
            return;
        };
        if !text.editing {
            return;
        }
        if key.ends_editing() {
            text.editing = false;
        } else if key.is_erase() && text.is_placeholder() {
            self.remove_text(id);
        }
    }

    fn text_blur(&mut self, id: ItemId) {
        let Some(text) = self.current_text_mut(id) else {
            return;
        };
        text.editing = false;
        if text.is_placeholder() {
            self.remove_text(id);
        }
    }

    fn remove_text(&mut self, id: ItemId) {
        if let Some(board) = self.current_board_mut() {
            if board.remove_text(id).is_some() {
                log::info!("Deleted empty text {}", id);
            }
        }
        self.interaction.deselect(id);
    }
}
