use crate::application::dto::Route;
use crate::application::read_models::{MessageView, ReadModelBuilder, ViewModel};
use crate::application::use_cases::{ExploreTreeUseCase, OpenPageUseCase, Page};
use crate::inspection::domain::Package;
use crate::inspection::services::{Completion, DependencyTree, FetchRequest, NodeId, ToggleOutcome};
use crate::ports::outbound::{PackageRepository, ProgressReporter, RecentlyViewedStore, ViewFormatter};
use crate::shared::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "Commands:
  expand <row>      show the dependencies of a row
  collapse <row>    hide the dependencies of a row
  toggle <row>      expand or collapse a row
  cancel <row>      stop loading a row
  open <route|gav>  navigate, e.g. open /packages/org.slf4j:slf4j-api:2.0.9
  wait              wait for all pending loads
  show              print the current page
  help              print this help
  quit              leave the explorer";

/// What the loop does after a command
enum Flow {
    Continue,
    Fetch(FetchRequest),
    Drain,
    Quit,
}

/// The page on screen and, for package pages, its dependency tree
struct Screen {
    page: Page,
    tree: Option<DependencyTree>,
}

impl Screen {
    fn new(page: Page) -> Self {
        let tree = match &page {
            Page::Package { package, .. } => Some(DependencyTree::new(package.clone())),
            _ => None,
        };
        Self { page, tree }
    }
}

/// ExploreSession - line-oriented interactive dependency explorer
///
/// Reads commands from any async line source and writes rendered views to
/// any async sink. Node fetches run in the background while further
/// commands are accepted; their results are applied as they arrive, in any
/// order. Navigating away drops the current tree, which cancels everything
/// it still has in flight.
pub struct ExploreSession<R, P, S> {
    open_page: OpenPageUseCase<R, P, S>,
    explorer: ExploreTreeUseCase<R, P>,
    formatter: Box<dyn ViewFormatter>,
}

impl<R, P, S> ExploreSession<R, P, S>
where
    R: PackageRepository + Clone,
    P: ProgressReporter,
    S: RecentlyViewedStore + Clone,
{
    pub fn new(
        open_page: OpenPageUseCase<R, P, S>,
        explorer: ExploreTreeUseCase<R, P>,
        formatter: Box<dyn ViewFormatter>,
    ) -> Self {
        Self {
            open_page,
            explorer,
            formatter,
        }
    }

    /// Runs until `quit` or end of input; pending fetches are drained at end of input
    pub async fn run<I, O>(&self, start: &Route, input: I, mut output: O) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut pending = FuturesUnordered::new();
        let mut screen = None;

        match self.open_page.execute(start).await {
            Ok(page) => {
                let mut opened = Screen::new(page);
                if let Some(request) = self.expand_root(&mut opened)? {
                    pending.push(self.explorer.fetch(request));
                }
                self.render_page(&opened, &mut output).await?;
                screen = Some(opened);
            }
            Err(error) => self.message(&mut output, &error_line(&error)).await?,
        }

        let mut lines = input.lines();
        let mut input_open = true;
        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        continue;
                    };
                    match self.handle(&line, &mut screen, &mut output).await? {
                        Flow::Continue => {}
                        Flow::Fetch(request) => pending.push(self.explorer.fetch(request)),
                        Flow::Drain => {
                            while let Some((request, result)) = pending.next().await {
                                apply(&mut screen, &request, result);
                            }
                            self.render_tree(&screen, &mut output).await?;
                        }
                        Flow::Quit => break,
                    }
                }
                Some((request, result)) = pending.next(), if !pending.is_empty() => {
                    if apply(&mut screen, &request, result) == Completion::Applied {
                        self.render_tree(&screen, &mut output).await?;
                    }
                }
                else => break,
            }
        }
        output.flush().await?;
        Ok(())
    }

    async fn handle<O>(&self, line: &str, screen: &mut Option<Screen>, output: &mut O) -> Result<Flow>
    where
        O: AsyncWrite + Unpin,
    {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let argument = words.next();

        match (command, argument) {
            ("quit" | "exit" | "q", _) => Ok(Flow::Quit),
            ("help" | "?", _) => {
                self.message(output, HELP).await?;
                Ok(Flow::Continue)
            }
            ("wait", _) => Ok(Flow::Drain),
            ("show", _) => {
                match screen {
                    Some(current) => self.render_page(current, output).await?,
                    None => self.message(output, "Nothing to show. Use 'open <route>'.").await?,
                }
                Ok(Flow::Continue)
            }
            ("open", Some(target)) => self.open(target, screen, output).await,
            ("expand" | "collapse" | "toggle" | "cancel", Some(row)) => {
                self.row_command(command, row, screen, output).await
            }
            _ => {
                let text = format!("Unknown command '{}'. Type 'help' for a list.", line.trim());
                self.message(output, &text).await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn open<O>(&self, target: &str, screen: &mut Option<Screen>, output: &mut O) -> Result<Flow>
    where
        O: AsyncWrite + Unpin,
    {
        let route = match Route::parse(target) {
            Ok(route) => route,
            Err(error) => {
                self.message(output, &error_line(&error.into())).await?;
                return Ok(Flow::Continue);
            }
        };
        match self.open_page.execute(&route).await {
            Ok(page) => {
                let mut opened = Screen::new(page);
                let flow = match self.expand_root(&mut opened)? {
                    Some(request) => Flow::Fetch(request),
                    None => Flow::Continue,
                };
                self.render_page(&opened, output).await?;
                // Replacing the screen drops the old tree and cancels its fetches.
                *screen = Some(opened);
                Ok(flow)
            }
            Err(error) => {
                self.message(output, &error_line(&error)).await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn row_command<O>(
        &self,
        command: &str,
        row: &str,
        screen: &mut Option<Screen>,
        output: &mut O,
    ) -> Result<Flow>
    where
        O: AsyncWrite + Unpin,
    {
        let Some(tree) = screen.as_mut().and_then(|s| s.tree.as_mut()) else {
            self.message(output, "No dependency tree on this page.").await?;
            return Ok(Flow::Continue);
        };
        let Some(id) = row_to_node(tree, row) else {
            self.message(output, &format!("No row '{}' in the tree.", row)).await?;
            return Ok(Flow::Continue);
        };

        if command == "cancel" {
            let cancelled = tree.cancel(id)?;
            let text = if cancelled { "Cancelled." } else { "Nothing to cancel." };
            self.message(output, text).await?;
            self.render_tree(screen, output).await?;
            return Ok(Flow::Continue);
        }

        let outcome = match command {
            "expand" => tree.expand(id)?,
            "collapse" => tree.collapse(id)?,
            _ => tree.toggle(id)?,
        };
        let flow = match outcome {
            ToggleOutcome::FetchRequired(request) => Flow::Fetch(request),
            ToggleOutcome::Ignored => {
                self.message(output, "Still loading.").await?;
                Flow::Continue
            }
            ToggleOutcome::Leaf => {
                self.message(output, "This package has no dependencies.").await?;
                Flow::Continue
            }
            _ => Flow::Continue,
        };
        self.render_tree(screen, output).await?;
        Ok(flow)
    }

    /// Opens the first level of a fresh tree
    fn expand_root(&self, screen: &mut Screen) -> Result<Option<FetchRequest>> {
        let Some(tree) = screen.tree.as_mut() else {
            return Ok(None);
        };
        match tree.expand(DependencyTree::ROOT)? {
            ToggleOutcome::FetchRequired(request) => Ok(Some(request)),
            _ => Ok(None),
        }
    }

    async fn render_page<O>(&self, screen: &Screen, output: &mut O) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        let view = ReadModelBuilder::page(&screen.page, screen.tree.as_ref());
        self.write_view(&view, output).await
    }

    async fn render_tree<O>(&self, screen: &Option<Screen>, output: &mut O) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        if let Some(tree) = screen.as_ref().and_then(|s| s.tree.as_ref()) {
            self.write_view(&ViewModel::Tree(ReadModelBuilder::tree(tree)), output)
                .await?;
        }
        Ok(())
    }

    async fn message<O>(&self, output: &mut O, message: &str) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        let view = ViewModel::Message(MessageView {
            message: message.to_string(),
        });
        self.write_view(&view, output).await
    }

    async fn write_view<O>(&self, view: &ViewModel, output: &mut O) -> Result<()>
    where
        O: AsyncWrite + Unpin,
    {
        let rendered = self.formatter.format(view)?;
        output.write_all(rendered.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }
}

/// Feeds a finished fetch to the tree on screen, if it is still there
fn apply(screen: &mut Option<Screen>, request: &FetchRequest, result: Result<Package>) -> Completion {
    match screen.as_mut().and_then(|s| s.tree.as_mut()) {
        Some(tree) => tree.complete(request, result),
        None => Completion::Discarded,
    }
}

fn row_to_node(tree: &DependencyTree, row: &str) -> Option<NodeId> {
    let index: usize = row.parse().ok()?;
    tree.visible_rows().get(index).map(|row| row.id)
}

fn error_line(error: &anyhow::Error) -> String {
    format!("❌ {}", error)
}
