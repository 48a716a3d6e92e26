//! The session data cache.
//!
//! Everything the front-end renders lives here: threads with their stacks,
//! scopes and variable containers, interned sources and their contents,
//! breakpoints, modules and the output log. Mutations enforce the DAP
//! reference-lifetime rules: a `variablesReference`, frame or scope is only
//! meaningful while its thread stays suspended, so resuming a thread evicts
//! everything hanging off it.

use crate::dap::types::{
    Breakpoint, DataBreakpoint, DataBreakpointInfoResponseBody, FunctionBreakpoint, Module,
    ModuleId, OutputEventBody, ProcessEventBody, Scope, SetVariableResponseBody, Source,
    SourceBreakpoint, StackFrame, StoppedEventBody, Thread, Variable,
};
use crate::error::Error;
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::{HashMap, VecDeque};

pub type ThreadId = i64;
pub type FrameId = i64;
pub type VariablesReference = i64;

/// Identity of a source: its path when it has one, otherwise its (positive)
/// `sourceReference`. A logical source is never keyed by both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Path(String),
    Reference(i64),
}

impl SourceKey {
    pub fn of(source: &Source) -> Result<SourceKey, Error> {
        if let Some(path) = &source.path {
            return Ok(SourceKey::Path(path.clone()));
        }
        match source.source_reference {
            Some(reference) if reference > 0 => Ok(SourceKey::Reference(reference)),
            _ => Err(Error::SourceWithoutId),
        }
    }
}

/// Execution status of one thread.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ThreadStatus {
    /// Suspended; carries the stop body when one was seen.
    Stopped(Option<StoppedEventBody>),
    Continued,
    #[default]
    Unknown,
}

impl ThreadStatus {
    pub fn is_stopped(&self) -> bool {
        matches!(self, ThreadStatus::Stopped(_))
    }
}

/// One thread and everything the adapter reported about it. The stack,
/// scope and variable caches die together with the thread's suspension.
#[derive(Debug, Clone)]
pub struct ThreadEntry {
    pub id: ThreadId,
    pub name: String,
    pub status: ThreadStatus,
    pub selected: bool,
    /// Set while a `stackTrace` for this thread is outstanding, so the
    /// front-end does not issue duplicates.
    pub requested_stack: bool,
    pub stack: Vec<StackFrame>,
    /// The stack is complete once a page came back short or without a
    /// `totalFrames` hint.
    pub stack_complete: bool,
    pub selected_frame: Option<usize>,
    pub scopes: IndexMap<FrameId, Vec<Scope>>,
    pub variables: HashMap<VariablesReference, Vec<Variable>>,
}

impl ThreadEntry {
    fn new(id: ThreadId, name: String, status: ThreadStatus) -> ThreadEntry {
        ThreadEntry {
            id,
            name,
            status,
            selected: false,
            requested_stack: false,
            stack: Vec::new(),
            stack_complete: false,
            selected_frame: None,
            scopes: IndexMap::new(),
            variables: HashMap::new(),
        }
    }

    /// Drop everything that is only valid while the thread is suspended.
    fn clear_execution_state(&mut self) {
        self.stack.clear();
        self.stack_complete = false;
        self.requested_stack = false;
        self.selected_frame = None;
        self.scopes.clear();
        self.variables.clear();
    }
}

/// Where a tracked breakpoint came from; replacement on a
/// `set*Breakpoints` response is scoped to one origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakpointOrigin {
    /// Announced by a `breakpoint` event.
    Event,
    /// `setBreakpoints` for one source.
    Source(SourceKey),
    /// `setFunctionBreakpoints`.
    Function,
    /// `setDataBreakpoints`.
    Data,
}

#[derive(Debug, Clone)]
pub struct TrackedBreakpoint {
    pub origin: BreakpointOrigin,
    pub breakpoint: Breakpoint,
}

/// How a `dataBreakpointInfo` result was keyed when it was requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataBreakpointKey {
    Variable { reference: i64, name: String },
    FrameExpression { frame_id: i64, name: String },
    GlobalExpression { name: String },
}

/// How long a `dataBreakpointInfo` result stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoLifetime {
    /// Valid only while this thread stays suspended.
    WhileThreadSuspended(ThreadId),
    Indefinite,
}

#[derive(Debug, Clone)]
pub struct DataBreakpointInfoEntry {
    pub body: DataBreakpointInfoResponseBody,
    pub lifetime: InfoLifetime,
}

/// Cached content of a source, fetched with the `source` request.
#[derive(Debug, Clone)]
pub struct SourceContent {
    pub content: String,
    pub mime_type: Option<String>,
}

/// Progress of a paged `stackTrace` fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackProgress {
    pub complete: bool,
    pub received: usize,
}

/// The whole cache. One instance per debug session, except for the output
/// log and the user's breakpoint inputs, which survive restarts.
#[derive(Default)]
pub struct SessionData {
    threads: IndexMap<ThreadId, ThreadEntry>,
    all_threads_status: ThreadStatus,
    sources: IndexMap<SourceKey, Source>,
    source_contents: HashMap<SourceKey, SourceContent>,
    modules: IndexMap<ModuleId, Module>,
    breakpoints: Vec<TrackedBreakpoint>,
    source_breakpoints: IndexMap<SourceKey, Vec<SourceBreakpoint>>,
    function_breakpoints: Vec<FunctionBreakpoint>,
    data_breakpoints: Vec<DataBreakpoint>,
    data_breakpoint_info: HashMap<DataBreakpointKey, DataBreakpointInfoEntry>,
    output: Vec<OutputEventBody>,
    notifications: VecDeque<String>,
    process: Option<ProcessEventBody>,
    exit_code: Option<i64>,
    terminated: bool,
    restart: Option<serde_json::Value>,
}

impl SessionData {
    pub fn new() -> SessionData {
        SessionData::default()
    }

    // ------------------------------- threads -------------------------------

    pub fn threads(&self) -> impl Iterator<Item = &ThreadEntry> {
        self.threads.values()
    }

    pub fn thread(&self, id: ThreadId) -> Option<&ThreadEntry> {
        self.threads.get(&id)
    }

    pub fn selected_thread(&self) -> Option<&ThreadEntry> {
        self.threads.values().find(|t| t.selected)
    }

    pub fn select_thread(&mut self, id: ThreadId) -> Result<(), Error> {
        if !self.threads.contains_key(&id) {
            return Err(Error::UnknownThread(id));
        }
        for thread in self.threads.values_mut() {
            thread.selected = thread.id == id;
        }
        Ok(())
    }

    /// Register a thread announced by a `thread` event with reason
    /// `started`. Its real name arrives with the next `threads` response.
    pub fn thread_started(&mut self, id: ThreadId) {
        self.threads
            .entry(id)
            .or_insert_with(|| ThreadEntry::new(id, format!("thread {id}"), ThreadStatus::Unknown));
    }

    /// Remove a thread and, with it, every frame, scope and variable
    /// container it owned.
    pub fn thread_exited(&mut self, id: ThreadId) {
        self.threads.shift_remove(&id);
    }

    /// Replace the thread table with a `threads` response. Threads missing
    /// from the response are disposed of; surviving ones keep their cached
    /// execution state; new ones start with the session-wide status when it
    /// is known.
    pub fn set_threads(&mut self, threads: Vec<Thread>) {
        let keep = threads.iter().map(|t| t.id).collect_vec();
        self.threads.retain(|id, _| keep.contains(id));
        for thread in threads {
            match self.threads.entry(thread.id) {
                indexmap::map::Entry::Occupied(mut entry) => {
                    entry.get_mut().name = thread.name;
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(ThreadEntry::new(
                        thread.id,
                        thread.name,
                        self.all_threads_status.clone(),
                    ));
                }
            }
        }
        if self.selected_thread().is_none() {
            let first_stopped = self
                .threads
                .values()
                .find(|t| t.status.is_stopped())
                .map(|t| t.id);
            if let Some(id) = first_stopped {
                let _ = self.select_thread(id);
            }
        }
    }

    /// Apply a `stopped` event body.
    pub fn mark_stopped(&mut self, body: &StoppedEventBody) {
        if body.all_threads_stopped == Some(true) {
            self.all_threads_status = ThreadStatus::Stopped(Some(body.clone()));
            for thread in self.threads.values_mut() {
                thread.status = ThreadStatus::Stopped(Some(body.clone()));
            }
        }
        if let Some(id) = body.thread_id {
            self.thread_started(id);
            let entry = self.threads.get_mut(&id).expect("just inserted");
            entry.status = ThreadStatus::Stopped(Some(body.clone()));
            if body.preserve_focus_hint != Some(true) {
                let _ = self.select_thread(id);
            }
        }
    }

    /// Apply a resume: mark the named thread (or all) continued and evict
    /// every reference-keyed cache that the resume invalidates.
    pub fn mark_continued(&mut self, thread_id: Option<ThreadId>, all_threads: bool) {
        if all_threads {
            self.all_threads_status = ThreadStatus::Continued;
            for thread in self.threads.values_mut() {
                thread.status = ThreadStatus::Continued;
                thread.clear_execution_state();
            }
            self.data_breakpoint_info
                .retain(|_, entry| entry.lifetime == InfoLifetime::Indefinite);
        } else if let Some(id) = thread_id {
            if let Some(thread) = self.threads.get_mut(&id) {
                thread.status = ThreadStatus::Continued;
                thread.clear_execution_state();
            }
            self.data_breakpoint_info.retain(|_, entry| {
                entry.lifetime != InfoLifetime::WhileThreadSuspended(id)
            });
        }
    }

    /// Drop cached stacks/scopes/variables without touching thread statuses,
    /// for an `invalidated` event: the data must be refetched, but nothing
    /// resumed.
    pub fn invalidate_cached_state(&mut self, thread_id: Option<ThreadId>) {
        match thread_id {
            Some(id) => {
                if let Some(thread) = self.threads.get_mut(&id) {
                    thread.clear_execution_state();
                }
            }
            None => {
                for thread in self.threads.values_mut() {
                    thread.clear_execution_state();
                }
            }
        }
    }

    /// Note that a `stackTrace` for this thread is in flight.
    pub fn stack_requested(&mut self, id: ThreadId) {
        if let Some(thread) = self.threads.get_mut(&id) {
            thread.requested_stack = true;
        }
    }

    /// Append one `stackTrace` page; sources referenced by the new frames
    /// are interned. Returns whether more pages should be requested.
    pub fn append_frames(
        &mut self,
        id: ThreadId,
        frames: Vec<StackFrame>,
        total_frames: Option<i64>,
        requested: usize,
    ) -> Result<StackProgress, Error> {
        for frame in &frames {
            if let Some(source) = &frame.source {
                if let Err(err) = self.upsert_source(source.clone()) {
                    log::warn!("frame {} carries an unidentifiable source: {err}", frame.id);
                }
            }
        }

        let thread = self.threads.get_mut(&id).ok_or(Error::UnknownThread(id))?;
        let page_len = frames.len();
        thread.stack.extend(frames);
        thread.requested_stack = false;

        let received = thread.stack.len();
        let complete = match total_frames {
            None => true,
            Some(total) => received as i64 >= total || page_len < requested,
        };
        thread.stack_complete = complete;
        Ok(StackProgress { complete, received })
    }

    pub fn frames(&self, id: ThreadId) -> Option<&[StackFrame]> {
        self.threads.get(&id).map(|t| t.stack.as_slice())
    }

    pub fn select_frame(&mut self, id: ThreadId, frame_index: usize) -> Result<(), Error> {
        let thread = self.threads.get_mut(&id).ok_or(Error::UnknownThread(id))?;
        if frame_index < thread.stack.len() {
            thread.selected_frame = Some(frame_index);
        }
        Ok(())
    }

    // ---------------------------- scopes/variables -------------------------

    /// Replace the scope list of one frame. Variable containers reachable
    /// through the replaced scopes are disposed with them.
    pub fn set_scopes(
        &mut self,
        id: ThreadId,
        frame_id: FrameId,
        scopes: Vec<Scope>,
    ) -> Result<(), Error> {
        let thread = self.threads.get_mut(&id).ok_or(Error::UnknownThread(id))?;
        if let Some(old) = thread.scopes.get(&frame_id) {
            let stale = old.iter().map(|s| s.variables_reference).collect_vec();
            for reference in stale {
                thread.variables.remove(&reference);
            }
        }
        thread.scopes.insert(frame_id, scopes);
        Ok(())
    }

    pub fn scopes(&self, id: ThreadId, frame_id: FrameId) -> Option<&[Scope]> {
        self.threads
            .get(&id)
            .and_then(|t| t.scopes.get(&frame_id))
            .map(Vec::as_slice)
    }

    /// Replace one variable container. Entries are sorted ascending by
    /// `variablesReference` so plain values come before structured ones, a
    /// stable order for the UI.
    pub fn set_variables(
        &mut self,
        id: ThreadId,
        reference: VariablesReference,
        mut variables: Vec<Variable>,
    ) -> Result<(), Error> {
        let thread = self.threads.get_mut(&id).ok_or(Error::UnknownThread(id))?;
        variables.sort_by_key(|v| v.variables_reference);
        thread.variables.insert(reference, variables);
        Ok(())
    }

    pub fn variables(&self, id: ThreadId, reference: VariablesReference) -> Option<&[Variable]> {
        self.threads
            .get(&id)
            .and_then(|t| t.variables.get(&reference))
            .map(Vec::as_slice)
    }

    /// Apply a `setVariable`/`setExpression` result to the cached child in
    /// its container.
    pub fn update_variable(
        &mut self,
        id: ThreadId,
        reference: VariablesReference,
        name: &str,
        update: &SetVariableResponseBody,
    ) -> Result<(), Error> {
        let thread = self.threads.get_mut(&id).ok_or(Error::UnknownThread(id))?;
        let container = thread
            .variables
            .get_mut(&reference)
            .ok_or(Error::StaleReference(reference))?;
        if let Some(variable) = container.iter_mut().find(|v| v.name == name) {
            variable.value = update.value.clone();
            if update.variable_type.is_some() {
                variable.variable_type = update.variable_type.clone();
            }
            if let Some(new_reference) = update.variables_reference {
                variable.variables_reference = new_reference;
            }
        }
        Ok(())
    }

    // ------------------------------- sources -------------------------------

    /// Intern or refresh a source; later reports replace earlier ones.
    pub fn upsert_source(&mut self, source: Source) -> Result<SourceKey, Error> {
        let key = SourceKey::of(&source)?;
        self.sources.insert(key.clone(), source);
        Ok(key)
    }

    pub fn sources(&self) -> impl Iterator<Item = (&SourceKey, &Source)> {
        self.sources.iter()
    }

    pub fn source(&self, key: &SourceKey) -> Option<&Source> {
        self.sources.get(key)
    }

    pub fn remove_source(&mut self, key: &SourceKey) {
        self.sources.shift_remove(key);
        self.source_contents.remove(key);
    }

    pub fn set_source_content(&mut self, key: SourceKey, content: String, mime_type: Option<String>) {
        self.source_contents
            .insert(key, SourceContent { content, mime_type });
    }

    pub fn source_content(&self, key: &SourceKey) -> Option<&SourceContent> {
        self.source_contents.get(key)
    }

    // ------------------------------- modules -------------------------------

    pub fn upsert_module(&mut self, module: Module) {
        self.modules.insert(module.id.clone(), module);
    }

    pub fn remove_module(&mut self, id: &ModuleId) {
        self.modules.shift_remove(id);
    }

    pub fn set_modules(&mut self, modules: Vec<Module>) {
        for module in modules {
            self.upsert_module(module);
        }
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    // ----------------------------- breakpoints -----------------------------

    pub fn breakpoints(&self) -> &[TrackedBreakpoint] {
        &self.breakpoints
    }

    /// The user's stored breakpoint inputs for one source.
    pub fn source_breakpoints(&self, key: &SourceKey) -> &[SourceBreakpoint] {
        self.source_breakpoints
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set_source_breakpoints(&mut self, key: SourceKey, breakpoints: Vec<SourceBreakpoint>) {
        self.source_breakpoints.insert(key, breakpoints);
    }

    pub fn function_breakpoints(&self) -> &[FunctionBreakpoint] {
        &self.function_breakpoints
    }

    pub fn set_function_breakpoints(&mut self, breakpoints: Vec<FunctionBreakpoint>) {
        self.function_breakpoints = breakpoints;
    }

    pub fn data_breakpoints(&self) -> &[DataBreakpoint] {
        &self.data_breakpoints
    }

    pub fn set_data_breakpoints(&mut self, breakpoints: Vec<DataBreakpoint>) {
        self.data_breakpoints = breakpoints;
    }

    /// Replace all tracked breakpoints of one origin with the adapter's
    /// response list.
    pub fn replace_breakpoints(&mut self, origin: BreakpointOrigin, breakpoints: Vec<Breakpoint>) {
        self.breakpoints.retain(|b| b.origin != origin);
        self.breakpoints.extend(breakpoints.into_iter().map(|breakpoint| {
            TrackedBreakpoint {
                origin: origin.clone(),
                breakpoint,
            }
        }));
    }

    /// Positional reconciliation of a `setBreakpoints` response with the
    /// stored inputs: the adapter's effective line overwrites the user's.
    pub fn reconcile_source_breakpoints(
        &mut self,
        key: &SourceKey,
        response: &[Breakpoint],
    ) -> Result<(), Error> {
        let inputs = self.source_breakpoints.get_mut(key).ok_or(
            Error::InvalidBreakpointResponse {
                sent: 0,
                got: response.len(),
            },
        )?;
        if inputs.len() != response.len() {
            return Err(Error::InvalidBreakpointResponse {
                sent: inputs.len(),
                got: response.len(),
            });
        }
        for (input, echoed) in inputs.iter_mut().zip(response) {
            if let Some(line) = echoed.line {
                input.line = line;
            }
        }
        Ok(())
    }

    /// Apply a `breakpoint` event by reason.
    pub fn apply_breakpoint_event(
        &mut self,
        reason: &crate::dap::types::BreakpointEventReason,
        breakpoint: Breakpoint,
    ) -> Result<(), Error> {
        use crate::dap::types::BreakpointEventReason;

        let id = breakpoint.id.ok_or(Error::NoBreakpointIdGiven)?;
        let position = self
            .breakpoints
            .iter()
            .position(|b| b.breakpoint.id == Some(id));
        match reason {
            BreakpointEventReason::New | BreakpointEventReason::Changed => match position {
                Some(index) => self.breakpoints[index].breakpoint = breakpoint,
                None => self.breakpoints.push(TrackedBreakpoint {
                    origin: BreakpointOrigin::Event,
                    breakpoint,
                }),
            },
            BreakpointEventReason::Removed => match position {
                Some(index) => {
                    self.breakpoints.remove(index);
                }
                None => return Err(Error::BreakpointDoesNotExist(id)),
            },
            BreakpointEventReason::Other(reason) => {
                log::warn!("ignoring breakpoint event with unknown reason {reason:?}");
            }
        }
        Ok(())
    }

    // ------------------------- data breakpoint info -------------------------

    pub fn store_data_breakpoint_info(
        &mut self,
        key: DataBreakpointKey,
        body: DataBreakpointInfoResponseBody,
        lifetime: InfoLifetime,
    ) {
        self.data_breakpoint_info
            .insert(key, DataBreakpointInfoEntry { body, lifetime });
    }

    pub fn data_breakpoint_info(&self, key: &DataBreakpointKey) -> Option<&DataBreakpointInfoEntry> {
        self.data_breakpoint_info.get(key)
    }

    // ------------------------------ the rest -------------------------------

    pub fn push_output(&mut self, body: OutputEventBody) {
        self.output.push(body);
    }

    pub fn outputs(&self) -> &[OutputEventBody] {
        &self.output
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.notifications.push_back(message);
    }

    pub fn drain_notifications(&mut self) -> Vec<String> {
        self.notifications.drain(..).collect()
    }

    pub fn set_process(&mut self, body: ProcessEventBody) {
        self.process = Some(body);
    }

    pub fn process(&self) -> Option<&ProcessEventBody> {
        self.process.as_ref()
    }

    pub fn set_exit_code(&mut self, code: i64) {
        self.exit_code = Some(code);
    }

    pub fn exit_code(&self) -> Option<i64> {
        self.exit_code
    }

    pub fn set_terminated(&mut self, restart: Option<serde_json::Value>) {
        self.terminated = true;
        if restart.is_some() {
            self.restart = restart;
        }
    }

    pub fn terminated(&self) -> bool {
        self.terminated
    }

    /// The verbatim `restart` payload of the last `terminated` event, to be
    /// passed to the next session's launch/attach.
    pub fn restart_payload(&self) -> Option<&serde_json::Value> {
        self.restart.as_ref()
    }

    /// Reset for a fresh session. The output log, the notifications, the
    /// user's breakpoint inputs and the restart payload survive; every
    /// adapter-owned cache is dropped.
    pub fn clear_for_new_session(&mut self) {
        self.threads.clear();
        self.all_threads_status = ThreadStatus::Unknown;
        self.sources.clear();
        self.source_contents.clear();
        self.modules.clear();
        self.breakpoints.clear();
        self.data_breakpoint_info.clear();
        self.process = None;
        self.exit_code = None;
        self.terminated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dap::types::StoppedReason;

    fn stopped_body(thread_id: Option<i64>, all: bool) -> StoppedEventBody {
        StoppedEventBody {
            reason: StoppedReason::Pause,
            description: None,
            thread_id,
            preserve_focus_hint: None,
            text: None,
            all_threads_stopped: all.then_some(true),
            hit_breakpoint_ids: None,
        }
    }

    fn thread(id: i64, name: &str) -> Thread {
        Thread {
            id,
            name: name.to_string(),
        }
    }

    fn frame(id: i64) -> StackFrame {
        StackFrame {
            id,
            name: format!("frame{id}"),
            source: None,
            line: 1,
            column: 1,
            end_line: None,
            end_column: None,
            can_restart: None,
            instruction_pointer_reference: None,
            module_id: None,
            presentation_hint: None,
        }
    }

    fn scope(name: &str, reference: i64) -> Scope {
        Scope {
            name: name.to_string(),
            presentation_hint: None,
            variables_reference: reference,
            named_variables: None,
            indexed_variables: None,
            expensive: false,
            source: None,
            line: None,
            column: None,
            end_line: None,
            end_column: None,
        }
    }

    fn variable(name: &str, reference: i64) -> Variable {
        Variable {
            name: name.to_string(),
            value: "1".to_string(),
            variables_reference: reference,
            ..Default::default()
        }
    }

    #[test]
    fn threads_response_disposes_removed_threads_fully() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main"), thread(2, "worker")]);
        data.mark_stopped(&stopped_body(Some(2), false));
        data.append_frames(2, vec![frame(10)], Some(1), 20).unwrap();
        data.set_scopes(2, 10, vec![scope("Locals", 100)]).unwrap();
        data.set_variables(2, 100, vec![variable("x", 0)]).unwrap();

        data.set_threads(vec![thread(1, "main")]);
        let ids: Vec<i64> = data.threads().map(|t| t.id).collect();
        assert_eq!(ids, [1]);
        assert!(data.frames(2).is_none());
        assert!(data.scopes(2, 10).is_none());
        assert!(data.variables(2, 100).is_none());
    }

    #[test]
    fn new_threads_inherit_the_session_wide_status() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main")]);
        data.mark_stopped(&stopped_body(Some(1), true));

        data.set_threads(vec![thread(1, "main"), thread(5, "late")]);
        assert!(data.thread(5).unwrap().status.is_stopped());
    }

    #[test]
    fn resume_of_all_threads_invalidates_every_reference() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main"), thread(2, "worker")]);
        data.mark_stopped(&stopped_body(Some(1), true));
        for id in [1, 2] {
            data.append_frames(id, vec![frame(id * 10)], Some(1), 20).unwrap();
            data.set_scopes(id, id * 10, vec![scope("Locals", id * 100)])
                .unwrap();
            data.set_variables(id, id * 100, vec![variable("x", 0)])
                .unwrap();
        }
        data.store_data_breakpoint_info(
            DataBreakpointKey::Variable {
                reference: 100,
                name: "x".to_string(),
            },
            DataBreakpointInfoResponseBody {
                data_id: Some("x".to_string()),
                description: "x".to_string(),
                access_types: None,
                can_persist: None,
            },
            InfoLifetime::WhileThreadSuspended(1),
        );

        data.mark_continued(Some(1), true);
        for id in [1, 2] {
            let entry = data.thread(id).unwrap();
            assert_eq!(entry.status, ThreadStatus::Continued);
            assert!(entry.stack.is_empty());
            assert!(entry.scopes.is_empty());
            assert!(entry.variables.is_empty());
        }
        assert!(data
            .data_breakpoint_info(&DataBreakpointKey::Variable {
                reference: 100,
                name: "x".to_string(),
            })
            .is_none());
    }

    #[test]
    fn single_thread_resume_leaves_others_alone() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main"), thread(2, "worker")]);
        data.mark_stopped(&stopped_body(Some(1), true));
        data.append_frames(2, vec![frame(20)], Some(1), 20).unwrap();

        data.mark_continued(Some(1), false);
        assert_eq!(data.thread(1).unwrap().status, ThreadStatus::Continued);
        assert!(data.thread(2).unwrap().status.is_stopped());
        assert_eq!(data.frames(2).unwrap().len(), 1);
    }

    #[test]
    fn stack_paging_completion_rules() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main")]);

        // Page full and below total: incomplete.
        let progress = data
            .append_frames(1, (0..20).map(frame).collect(), Some(50), 20)
            .unwrap();
        assert!(!progress.complete);
        assert_eq!(progress.received, 20);

        // Short page: complete even though total not reached.
        let progress = data
            .append_frames(1, (20..30).map(frame).collect(), Some(50), 20)
            .unwrap();
        assert!(progress.complete);

        // Absent totalFrames: complete immediately.
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main")]);
        let progress = data
            .append_frames(1, (0..20).map(frame).collect(), None, 20)
            .unwrap();
        assert!(progress.complete);
    }

    #[test]
    fn replacing_scopes_disposes_their_variable_containers() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main")]);
        data.set_scopes(1, 7, vec![scope("Locals", 100)]).unwrap();
        data.set_variables(1, 100, vec![variable("x", 0)]).unwrap();

        data.set_scopes(1, 7, vec![scope("Locals", 200)]).unwrap();
        assert!(data.variables(1, 100).is_none());
    }

    #[test]
    fn variables_are_sorted_by_reference() {
        let mut data = SessionData::new();
        data.set_threads(vec![thread(1, "main")]);
        data.set_variables(
            1,
            50,
            vec![
                variable("structured", 51),
                variable("plain", 0),
                variable("other", 52),
            ],
        )
        .unwrap();
        let names: Vec<&str> = data
            .variables(1, 50)
            .unwrap()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, ["plain", "structured", "other"]);
    }

    #[test]
    fn source_identity_is_path_or_reference_never_both() {
        let mut data = SessionData::new();
        let key = data
            .upsert_source(Source {
                path: Some("/a.c".to_string()),
                source_reference: Some(33),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(key, SourceKey::Path("/a.c".to_string()));

        let key = data
            .upsert_source(Source {
                source_reference: Some(33),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(key, SourceKey::Reference(33));

        assert!(matches!(
            data.upsert_source(Source::default()),
            Err(Error::SourceWithoutId)
        ));
        assert_eq!(data.sources().count(), 2);
    }

    #[test]
    fn set_breakpoints_reconciliation_is_positional() {
        let mut data = SessionData::new();
        let key = SourceKey::Path("/a.c".to_string());
        data.set_source_breakpoints(
            key.clone(),
            vec![
                SourceBreakpoint {
                    line: 10,
                    ..Default::default()
                },
                SourceBreakpoint {
                    line: 20,
                    ..Default::default()
                },
            ],
        );

        let response = vec![
            Breakpoint {
                id: Some(1),
                verified: true,
                line: Some(11),
                ..Default::default()
            },
            Breakpoint {
                id: Some(2),
                verified: false,
                message: Some("could not bind".to_string()),
                line: Some(20),
                ..Default::default()
            },
        ];
        data.reconcile_source_breakpoints(&key, &response).unwrap();
        data.replace_breakpoints(BreakpointOrigin::Source(key.clone()), response);

        let lines: Vec<i64> = data.source_breakpoints(&key).iter().map(|b| b.line).collect();
        assert_eq!(lines, [11, 20]);
        assert_eq!(data.breakpoints().len(), 2);
        assert!(!data.breakpoints()[1].breakpoint.verified);

        let err = data
            .reconcile_source_breakpoints(&key, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBreakpointResponse { sent: 2, got: 0 }
        ));
    }

    #[test]
    fn breakpoint_events_upsert_and_remove_by_id() {
        use crate::dap::types::BreakpointEventReason;

        let mut data = SessionData::new();
        data.apply_breakpoint_event(
            &BreakpointEventReason::New,
            Breakpoint {
                id: Some(9),
                verified: false,
                ..Default::default()
            },
        )
        .unwrap();
        data.apply_breakpoint_event(
            &BreakpointEventReason::Changed,
            Breakpoint {
                id: Some(9),
                verified: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(data.breakpoints()[0].breakpoint.verified);

        assert!(matches!(
            data.apply_breakpoint_event(
                &BreakpointEventReason::New,
                Breakpoint::default()
            ),
            Err(Error::NoBreakpointIdGiven)
        ));
        assert!(matches!(
            data.apply_breakpoint_event(
                &BreakpointEventReason::Removed,
                Breakpoint {
                    id: Some(404),
                    ..Default::default()
                }
            ),
            Err(Error::BreakpointDoesNotExist(404))
        ));

        data.apply_breakpoint_event(
            &BreakpointEventReason::Removed,
            Breakpoint {
                id: Some(9),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(data.breakpoints().is_empty());
    }

    #[test]
    fn output_and_inputs_survive_session_reset() {
        let mut data = SessionData::new();
        data.push_output(OutputEventBody {
            category: None,
            output: "hello\n".to_string(),
            group: None,
            variables_reference: None,
            source: None,
            line: None,
            column: None,
            data: None,
        });
        data.set_source_breakpoints(
            SourceKey::Path("/a.c".to_string()),
            vec![SourceBreakpoint {
                line: 3,
                ..Default::default()
            }],
        );
        data.set_threads(vec![thread(1, "main")]);
        data.set_terminated(Some(serde_json::json!({"port": 9229})));

        data.clear_for_new_session();
        assert_eq!(data.outputs().len(), 1);
        assert_eq!(
            data.source_breakpoints(&SourceKey::Path("/a.c".to_string()))
                .len(),
            1
        );
        assert_eq!(data.threads().count(), 0);
        assert!(!data.terminated());
        assert!(data.restart_payload().is_some());
    }
}
