use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::cli::entry::{pick_from, prompt};
use crate::cli::Book;
use crate::error::Result;
use crate::fmt::{money, number};
use crate::models::{Company, Transaction};
use crate::reports::{self, MonthlyRow};
use crate::tui::{money_span, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const MENU_ITEMS: &[&str] = &[
    "Look up a client",
    "Client list",
    "Record a transaction",
    "Manage client records",
];

const PAGE_SIZE: usize = 20;

enum DashboardScreen {
    Home,
    Lookup(LookupPicker),
    Detail(DetailView),
    List(ListView),
}

enum TerminalCommand {
    Entry,
    Manage,
}

struct HomeData {
    clients: usize,
    active: usize,
    txn_count: usize,
    outstanding: f64,
    top_balances: Vec<(String, f64)>,
    chart_labels: Vec<String>,
    chart_sales: Vec<u64>,
    chart_collections: Vec<u64>,
}

// ---------------------------------------------------------------------------
// Lookup picker — incremental name filter over active clients
// ---------------------------------------------------------------------------

struct LookupPicker {
    names: Vec<String>,
    query: String,
    selection: usize,
}

impl LookupPicker {
    fn new(names: Vec<String>) -> Self {
        Self {
            names,
            query: String::new(),
            selection: 0,
        }
    }

    fn filtered(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| self.query.is_empty() || n.contains(self.query.as_str()))
            .map(|n| n.as_str())
            .collect()
    }

    fn selected_name(&self) -> Option<String> {
        self.filtered().get(self.selection).map(|n| n.to_string())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, query_area, list_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(" Look up a client").style(HEADER_STYLE),
            header_area,
        );
        frame.render_widget(
            Paragraph::new(format!(" Filter: {}_", self.query)),
            query_area,
        );

        let matches = self.filtered();
        let mut lines = Vec::new();
        if matches.is_empty() {
            lines.push(Line::from(" No matching active clients."));
        }
        for (i, name) in matches.iter().enumerate() {
            let marker = if i == self.selection { ">" } else { " " };
            let style = if i == self.selection {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!(" {marker} {name}"), style)));
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        frame.render_widget(
            Paragraph::new(" Type=filter  Up/Down=navigate  Enter=open  Esc=back")
                .style(FOOTER_STYLE),
            hints_area,
        );
    }

    /// Returns true when Enter selected a client.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => self.selection = self.selection.saturating_sub(1),
            KeyCode::Down => {
                let max = self.filtered().len().saturating_sub(1);
                self.selection = (self.selection + 1).min(max);
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.selection = 0;
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.selection = 0;
            }
            KeyCode::Enter => return self.selected_name().is_some(),
            _ => {}
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Detail view — one client's info, history and monthly totals
// ---------------------------------------------------------------------------

struct DetailView {
    company: Company,
    history: Vec<Transaction>,
    monthly: Vec<MonthlyRow>,
    offset: usize,
    table_state: TableState,
}

impl DetailView {
    fn new(company: Company, history: Vec<Transaction>) -> Self {
        let refs: Vec<&Transaction> = history.iter().collect();
        let monthly = reports::monthly_summary(&refs);
        Self {
            company,
            history,
            monthly,
            offset: 0,
            table_state: TableState::default(),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let monthly_height = (self.monthly.len().min(6) + 2) as u16;
        let [header_area, info_area, table_area, monthly_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Fill(1),
                Constraint::Length(if self.monthly.is_empty() { 0 } else { monthly_height }),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", self.company.name)).style(HEADER_STYLE),
            header_area,
        );

        let dash = |s: &str| {
            if s.is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        };
        let info_lines = vec![
            Line::from(format!(" Manager     {}", dash(&self.company.manager))),
            Line::from(format!(" Phone       {}", dash(&self.company.phone))),
            Line::from(format!(" Content     {}", dash(&self.company.content))),
            Line::from(vec![
                Span::raw(" Balance     "),
                money_span(self.company.balance),
            ]),
            Line::from(format!(" Status      {}", dash(&self.company.status))),
        ];
        frame.render_widget(Paragraph::new(info_lines), info_area);

        if self.history.is_empty() {
            frame.render_widget(
                Paragraph::new(" No transactions on file.").style(FOOTER_STYLE),
                table_area,
            );
        } else {
            let visible = table_area.height.saturating_sub(1) as usize;
            let rows: Vec<Row> = self
                .history
                .iter()
                .skip(self.offset)
                .take(visible)
                .map(|t| {
                    Row::new(vec![
                        Cell::from(t.date.clone()),
                        Cell::from(money(t.sales)),
                        Cell::from(money(t.collection)),
                        Cell::from(money(t.balance)),
                        Cell::from(t.memo.clone()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Length(12),
                    Constraint::Length(16),
                    Constraint::Length(16),
                    Constraint::Length(16),
                    Constraint::Fill(1),
                ],
            )
            .header(
                Row::new(vec!["Date", "Sales", "Collection", "Balance", "Memo"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .row_highlight_style(SELECTED_STYLE);
            frame.render_stateful_widget(table, table_area, &mut self.table_state);
        }

        if !self.monthly.is_empty() {
            let mut lines = vec![Line::from(Span::styled(
                " Monthly totals (month / sales / collection)",
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            for row in self.monthly.iter().rev().take(6) {
                lines.push(Line::from(format!(
                    " {}   {:>16}   {:>16}",
                    row.month,
                    money(row.sales),
                    money(row.collection)
                )));
            }
            frame.render_widget(Paragraph::new(lines), monthly_area);
        }

        frame.render_widget(
            Paragraph::new(" Up/Down=scroll  Esc=back  q=quit").style(FOOTER_STYLE),
            hints_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down => {
                let max = self.history.len().saturating_sub(1);
                self.offset = (self.offset + 1).min(max);
            }
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(PAGE_SIZE),
            KeyCode::PageDown => {
                let max = self.history.len().saturating_sub(1);
                self.offset = (self.offset + PAGE_SIZE).min(max);
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// List view — all clients, with a show-all toggle
// ---------------------------------------------------------------------------

struct ListView {
    companies: Vec<Company>,
    show_all: bool,
    offset: usize,
    selected: usize,
}

impl ListView {
    fn new(companies: Vec<Company>) -> Self {
        Self {
            companies,
            show_all: false,
            offset: 0,
            selected: 0,
        }
    }

    fn visible(&self) -> Vec<&Company> {
        reports::visible_companies(&self.companies, self.show_all)
    }

    fn selected_name(&self) -> Option<String> {
        self.visible()
            .get(self.offset + self.selected)
            .map(|c| c.name.clone())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, table_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let visible = self.visible();
        let title = if self.show_all {
            format!(" All clients ({})", visible.len())
        } else {
            format!(" Active clients ({})", visible.len())
        };
        frame.render_widget(Paragraph::new(title).style(HEADER_STYLE), header_area);

        let rows_that_fit = table_area.height.saturating_sub(1) as usize;
        let rows: Vec<Row> = visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(rows_that_fit)
            .map(|(i, c)| {
                let row = Row::new(vec![
                    Cell::from(c.name.clone()),
                    Cell::from(c.manager.clone()),
                    Cell::from(c.phone.clone()),
                    Cell::from(money(c.balance)),
                    Cell::from(c.status.clone()),
                ]);
                if i == self.offset + self.selected {
                    row.style(SELECTED_STYLE)
                } else {
                    row
                }
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Length(16),
                Constraint::Length(18),
                Constraint::Fill(1),
            ],
        )
        .header(
            Row::new(vec!["Client", "Manager", "Phone", "Balance", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(table, table_area);

        frame.render_widget(
            Paragraph::new(" Up/Down=navigate  Enter=detail  a=toggle ended/suspended  Esc=back")
                .style(FOOTER_STYLE),
            hints_area,
        );
    }

    /// Returns true when Enter selected a client.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let count = self.visible().len();
        match code {
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                } else {
                    self.offset = self.offset.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.offset + self.selected + 1 < count {
                    if self.selected + 1 < PAGE_SIZE {
                        self.selected += 1;
                    } else {
                        self.offset += 1;
                    }
                }
            }
            KeyCode::Char('a') => {
                self.show_all = !self.show_all;
                self.offset = 0;
                self.selected = 0;
            }
            KeyCode::Enter => return self.selected_name().is_some(),
            _ => {}
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

struct Dashboard {
    screen: DashboardScreen,
    menu_selection: usize,
    home_data: Option<HomeData>,
    terminal_action: Option<TerminalCommand>,
    status_message: Option<String>,
}

impl Dashboard {
    fn new() -> Self {
        Self {
            screen: DashboardScreen::Home,
            menu_selection: 0,
            home_data: None,
            terminal_action: None,
            status_message: None,
        }
    }

    fn load_data(&mut self, book: &mut Book) -> Result<()> {
        let companies = book.companies()?;
        let txns = book.transactions()?;
        let stats = reports::book_stats(&companies, &txns);

        let mut top_balances: Vec<(String, f64)> = reports::visible_companies(&companies, false)
            .iter()
            .map(|c| (c.name.clone(), c.balance))
            .collect();
        top_balances.sort_by(|a, b| b.1.total_cmp(&a.1));
        top_balances.truncate(5);

        let refs: Vec<&Transaction> = txns.iter().collect();
        let monthly = reports::monthly_summary(&refs);
        let recent: Vec<&MonthlyRow> = monthly.iter().rev().take(12).rev().collect();
        let chart_labels = recent
            .iter()
            .map(|m| m.month.get(5..).unwrap_or(&m.month).to_string())
            .collect();
        let chart_sales = recent.iter().map(|m| m.sales.max(0.0) as u64).collect();
        let chart_collections = recent
            .iter()
            .map(|m| m.collection.max(0.0) as u64)
            .collect();

        self.home_data = Some(HomeData {
            clients: stats.companies,
            active: stats.active,
            txn_count: stats.transactions,
            outstanding: stats.outstanding,
            top_balances,
            chart_labels,
            chart_sales,
            chart_collections,
        });
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            DashboardScreen::Lookup(picker) => picker.draw(frame),
            DashboardScreen::Detail(view) => view.draw(frame),
            DashboardScreen::List(view) => view.draw(frame),
            DashboardScreen::Home => self.draw_home(frame),
        }
    }

    fn draw_home(&self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let menu_rows = MENU_ITEMS.len() as u16 + 1;
        let [header_area, sep1, stats_area, sep2, chart_area, sep3, menu_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(menu_rows),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(" Clientbook: the ledger at a glance.").style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget.clone(), sep2);
        frame.render_widget(sep_widget.clone(), sep3);

        if let Some(data) = &self.home_data {
            let [left_area, right_area] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(stats_area);

            let stats_lines = vec![
                Line::from(format!(" Clients        {}", number(data.clients as i64))),
                Line::from(format!(" Active         {}", number(data.active as i64))),
                Line::from(format!(" Transactions   {}", number(data.txn_count as i64))),
                Line::from(vec![
                    Span::raw(" Outstanding    "),
                    money_span(data.outstanding),
                ]),
            ];
            frame.render_widget(Paragraph::new(stats_lines), left_area);

            let mut balance_lines = vec![Line::from(Span::styled(
                " Largest balances",
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            for (name, bal) in &data.top_balances {
                balance_lines.push(Line::from(vec![
                    Span::raw(format!(" {:<20}", name)),
                    money_span(*bal),
                ]));
            }
            frame.render_widget(Paragraph::new(balance_lines), right_area);

            if !data.chart_labels.is_empty() {
                let sales_style = Style::default().fg(Color::Rgb(80, 220, 100));
                let collection_style = Style::default().fg(Color::Cyan);

                let groups: Vec<BarGroup> = data
                    .chart_labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        let sales = data.chart_sales.get(i).copied().unwrap_or(0);
                        let coll = data.chart_collections.get(i).copied().unwrap_or(0);
                        let bars = vec![
                            Bar::default().value(sales).style(sales_style),
                            Bar::default().value(coll).style(collection_style),
                        ];
                        BarGroup::default()
                            .label(Line::from(label.as_str()))
                            .bars(&bars)
                    })
                    .collect();

                let block = Block::default()
                    .title("Monthly sales / collections")
                    .title_style(Style::default().add_modifier(Modifier::BOLD))
                    .borders(Borders::NONE);

                let mut chart = BarChart::default()
                    .block(block)
                    .bar_width(2)
                    .bar_gap(0)
                    .group_gap(1);
                for group in groups {
                    chart = chart.data(group);
                }
                frame.render_widget(chart, chart_area);
            }
        }

        let [menu_title_area, menu_items_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(menu_area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " What would you like to do?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            menu_title_area,
        );
        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if i == self.menu_selection { ">" } else { " " };
                let style = if i == self.menu_selection {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!(" {marker} {item}"), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(menu_lines), menu_items_area);

        if let Some(msg) = &self.status_message {
            frame.render_widget(
                Paragraph::new(format!(" {msg}")).style(Style::default().fg(Color::Yellow)),
                hints_area,
            );
        } else {
            frame.render_widget(
                Paragraph::new(" Up/Down=navigate  Enter=select  r=refresh  q=quit")
                    .style(FOOTER_STYLE),
                hints_area,
            );
        }
    }

    /// Returns true to quit the dashboard.
    fn handle_home_key(&mut self, code: KeyCode, book: &mut Book) -> bool {
        self.status_message = None;
        match code {
            KeyCode::Up => self.menu_selection = self.menu_selection.saturating_sub(1),
            KeyCode::Down => {
                self.menu_selection = (self.menu_selection + 1).min(MENU_ITEMS.len() - 1)
            }
            KeyCode::Char('q') => return true,
            KeyCode::Enter => match self.menu_selection {
                0 => self.screen = self.enter_lookup(book),
                1 => self.screen = self.enter_list(book),
                2 => self.terminal_action = Some(TerminalCommand::Entry),
                3 => self.terminal_action = Some(TerminalCommand::Manage),
                _ => {}
            },
            _ => {}
        }
        false
    }

    fn enter_lookup(&mut self, book: &mut Book) -> DashboardScreen {
        match book.companies() {
            Ok(companies) => {
                let names: Vec<String> = reports::visible_companies(&companies, false)
                    .iter()
                    .map(|c| c.name.clone())
                    .collect();
                if names.is_empty() {
                    self.status_message = Some("No active clients.".to_string());
                    return DashboardScreen::Home;
                }
                DashboardScreen::Lookup(LookupPicker::new(names))
            }
            Err(e) => {
                self.status_message = Some(format!("Could not load clients: {e}"));
                DashboardScreen::Home
            }
        }
    }

    fn enter_list(&mut self, book: &mut Book) -> DashboardScreen {
        match book.companies() {
            Ok(companies) => {
                if companies.is_empty() {
                    self.status_message = Some("No client data in the summary sheet.".to_string());
                    return DashboardScreen::Home;
                }
                DashboardScreen::List(ListView::new(companies))
            }
            Err(e) => {
                self.status_message = Some(format!("Could not load clients: {e}"));
                DashboardScreen::Home
            }
        }
    }

    fn enter_detail(&mut self, name: &str, book: &mut Book) -> DashboardScreen {
        let loaded = book.companies().and_then(|companies| {
            let company = reports::find_company(&companies, name).cloned();
            let txns = book.transactions()?;
            Ok((company, txns))
        });
        match loaded {
            Ok((Some(company), txns)) => {
                let history: Vec<Transaction> = reports::company_history(&txns, &company.name)
                    .into_iter()
                    .cloned()
                    .collect();
                DashboardScreen::Detail(DetailView::new(company, history))
            }
            Ok((None, _)) => {
                self.status_message = Some(format!("Client not found: {name}"));
                DashboardScreen::Home
            }
            Err(e) => {
                self.status_message = Some(format!("Could not load client: {e}"));
                DashboardScreen::Home
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal-mode flows for the simulated write forms
// ---------------------------------------------------------------------------

fn wait_for_enter() {
    println!("\nPress Enter to return to the dashboard...");
    let _ = std::io::stdin().read_line(&mut String::new());
}

fn run_terminal_command(cmd: TerminalCommand, workbook: Option<&str>) {
    let result = match cmd {
        TerminalCommand::Entry => super::entry::run(workbook, None, None, None, None, None),
        TerminalCommand::Manage => run_manage(workbook),
    };
    if let Err(e) = result {
        eprintln!("\nError: {e}");
    }
    wait_for_enter();
}

fn run_manage(workbook: Option<&str>) -> Result<()> {
    let choice = prompt("Manage clients: (a) register new, (u) update existing: ");
    match choice.as_str() {
        "a" => {
            let name = prompt("Client name: ");
            if name.is_empty() {
                return Ok(());
            }
            let manager = prompt("Manager: ");
            let phone = prompt("Phone: ");
            let content = prompt("Content: ");
            super::manage::add(
                workbook,
                &name,
                Some(&manager).filter(|s| !s.is_empty()).map(|s| s.as_str()),
                Some(&phone).filter(|s| !s.is_empty()).map(|s| s.as_str()),
                Some(&content).filter(|s| !s.is_empty()).map(|s| s.as_str()),
            )
        }
        "u" => {
            let mut book = Book::open(workbook)?;
            let companies = book.companies()?;
            if companies.is_empty() {
                println!("No client data in the summary sheet.");
                return Ok(());
            }
            let names: Vec<&str> = companies.iter().map(|c| c.name.as_str()).collect();
            let Some(name) = pick_from("Clients:", &names) else {
                return Ok(());
            };
            let manager = prompt("New manager (blank to keep): ");
            let phone = prompt("New phone (blank to keep): ");
            let end = prompt("Mark relationship ended? (y/N): ").eq_ignore_ascii_case("y");
            super::manage::update(
                workbook,
                &name,
                Some(&manager).filter(|s| !s.is_empty()).map(|s| s.as_str()),
                Some(&phone).filter(|s| !s.is_empty()).map(|s| s.as_str()),
                end,
            )
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

pub fn run(workbook: Option<&str>) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    loop {
        let mut book = Book::open(workbook)?;
        let mut dashboard = Dashboard::new();
        dashboard.load_data(&mut book)?;

        let mut terminal = ratatui::init();

        let exit: Result<Option<TerminalCommand>> = loop {
            if let Err(e) = terminal.draw(|frame| dashboard.draw(frame)) {
                break Err(e.into());
            }

            match event::read() {
                Err(e) => break Err(e.into()),
                Ok(Event::Key(key)) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break Ok(None);
                    }

                    let mut return_home = false;
                    let mut open_detail: Option<String> = None;
                    let should_quit = match &mut dashboard.screen {
                        DashboardScreen::Home => {
                            if key.code == KeyCode::Char('r') {
                                let _ = dashboard.load_data(&mut book);
                                false
                            } else {
                                dashboard.handle_home_key(key.code, &mut book)
                            }
                        }
                        DashboardScreen::Lookup(picker) => match key.code {
                            KeyCode::Esc => {
                                return_home = true;
                                false
                            }
                            code => {
                                if picker.handle_key(code) {
                                    open_detail = picker.selected_name();
                                }
                                false
                            }
                        },
                        DashboardScreen::Detail(view) => match key.code {
                            KeyCode::Esc => {
                                return_home = true;
                                false
                            }
                            KeyCode::Char('q') => true,
                            code => {
                                view.handle_key(code);
                                false
                            }
                        },
                        DashboardScreen::List(view) => match key.code {
                            KeyCode::Esc => {
                                return_home = true;
                                false
                            }
                            KeyCode::Char('q') => true,
                            code => {
                                if view.handle_key(code) {
                                    open_detail = view.selected_name();
                                }
                                false
                            }
                        },
                    };

                    if let Some(name) = open_detail {
                        dashboard.screen = dashboard.enter_detail(&name, &mut book);
                    } else if return_home {
                        dashboard.screen = DashboardScreen::Home;
                        let _ = dashboard.load_data(&mut book);
                    }

                    if let Some(cmd) = dashboard.terminal_action.take() {
                        break Ok(Some(cmd));
                    }
                    if should_quit {
                        break Ok(None);
                    }
                }
                _ => {}
            }
        };

        drop(terminal);
        ratatui::restore();

        match exit {
            Err(e) => return Err(e),
            Ok(None) => return Ok(()),
            Ok(Some(cmd)) => run_terminal_command(cmd, workbook),
        }
    }
}
