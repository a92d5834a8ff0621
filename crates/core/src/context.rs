//! Plain-text rendering of agency data for LLM prompts.
//!
//! Handlers fill only the sections an assistant asks for; absent sections
//! are omitted from the rendered block.

use std::fmt::Write;

use crate::finance::{format_brl, percent_change};
use crate::types::{Cents, Date};

/// Maximum rows rendered per list section.
pub const MAX_ROWS_PER_SECTION: usize = 25;

#[derive(Debug, Clone, Default)]
pub struct AgencySnapshot {
    pub name: String,
    pub plan: String,
    pub client_count: i64,
    pub project_count: i64,
    pub member_count: i64,
}

#[derive(Debug, Clone)]
pub struct ClientLine {
    pub name: String,
    pub company: Option<String>,
    pub status: String,
    pub monthly_fee_cents: Option<Cents>,
}

#[derive(Debug, Clone)]
pub struct ProjectLine {
    pub name: String,
    pub client_name: String,
    pub status: String,
    pub budget_cents: Option<Cents>,
    pub end_date: Option<Date>,
}

#[derive(Debug, Clone)]
pub struct TaskLine {
    pub title: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Date>,
}

#[derive(Debug, Clone, Default)]
pub struct FinanceSnapshot {
    pub revenue_month_cents: Cents,
    pub revenue_previous_cents: Cents,
    pub expense_month_cents: Cents,
    pub expense_previous_cents: Cents,
    pub pending_revenue_cents: Cents,
}

#[derive(Debug, Clone, Default)]
pub struct TaskSnapshot {
    pub open: i64,
    pub overdue: i64,
    pub done: i64,
    pub upcoming: Vec<TaskLine>,
}

#[derive(Debug, Clone)]
pub struct ClientDetail {
    pub client: ClientLine,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub projects: Vec<ProjectLine>,
    pub revenue_total_cents: Cents,
}

#[derive(Debug, Clone)]
pub struct ProjectDetail {
    pub project: ProjectLine,
    pub description: Option<String>,
    pub tasks: Vec<TaskLine>,
}

/// Everything an assistant may be given about the agency.
#[derive(Debug, Clone, Default)]
pub struct AgencyContext {
    pub agency: Option<AgencySnapshot>,
    pub clients: Option<Vec<ClientLine>>,
    pub projects: Option<Vec<ProjectLine>>,
    pub finances: Option<FinanceSnapshot>,
    pub tasks: Option<TaskSnapshot>,
    pub client: Option<ClientDetail>,
    pub project: Option<ProjectDetail>,
}

impl AgencyContext {
    /// Render the populated sections as a Markdown-ish text block.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(a) = &self.agency {
            let _ = writeln!(out, "## Agency");
            let _ = writeln!(out, "Name: {} (plan: {})", a.name, a.plan);
            let _ = writeln!(
                out,
                "Clients: {} | Projects: {} | Team members: {}",
                a.client_count, a.project_count, a.member_count
            );
            out.push('\n');
        }

        if let Some(clients) = &self.clients {
            let _ = writeln!(out, "## Clients ({})", clients.len());
            if clients.is_empty() {
                let _ = writeln!(out, "No clients registered.");
            }
            for c in clients.iter().take(MAX_ROWS_PER_SECTION) {
                let _ = writeln!(out, "- {}", client_line(c));
            }
            more_marker(&mut out, clients.len());
            out.push('\n');
        }

        if let Some(projects) = &self.projects {
            let _ = writeln!(out, "## Projects ({})", projects.len());
            if projects.is_empty() {
                let _ = writeln!(out, "No projects registered.");
            }
            for p in projects.iter().take(MAX_ROWS_PER_SECTION) {
                let _ = writeln!(out, "- {}", project_line(p));
            }
            more_marker(&mut out, projects.len());
            out.push('\n');
        }

        if let Some(f) = &self.finances {
            let _ = writeln!(out, "## Finances (current month)");
            let _ = writeln!(
                out,
                "Revenue: {} ({:+.1}% vs previous month)",
                format_brl(f.revenue_month_cents),
                percent_change(f.revenue_month_cents, f.revenue_previous_cents)
            );
            let _ = writeln!(
                out,
                "Expenses: {} ({:+.1}% vs previous month)",
                format_brl(f.expense_month_cents),
                percent_change(f.expense_month_cents, f.expense_previous_cents)
            );
            let _ = writeln!(
                out,
                "Profit: {}",
                format_brl(f.revenue_month_cents - f.expense_month_cents)
            );
            let _ = writeln!(out, "Pending receivables: {}", format_brl(f.pending_revenue_cents));
            out.push('\n');
        }

        if let Some(t) = &self.tasks {
            let _ = writeln!(out, "## Tasks");
            let _ = writeln!(out, "Open: {} | Overdue: {} | Done: {}", t.open, t.overdue, t.done);
            if !t.upcoming.is_empty() {
                let _ = writeln!(out, "Upcoming deadlines:");
                for task in t.upcoming.iter().take(MAX_ROWS_PER_SECTION) {
                    let _ = writeln!(out, "- {}", task_line(task));
                }
            }
            out.push('\n');
        }

        if let Some(d) = &self.client {
            let _ = writeln!(out, "## Client: {}", d.client.name);
            let _ = writeln!(out, "{}", client_line(&d.client));
            if let Some(email) = &d.email {
                let _ = writeln!(out, "Email: {email}");
            }
            if let Some(notes) = d.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                let _ = writeln!(out, "Notes: {notes}");
            }
            let _ = writeln!(out, "Total revenue from client: {}", format_brl(d.revenue_total_cents));
            if d.projects.is_empty() {
                let _ = writeln!(out, "No projects with this client.");
            } else {
                let _ = writeln!(out, "Projects:");
                for p in d.projects.iter().take(MAX_ROWS_PER_SECTION) {
                    let _ = writeln!(out, "- {}", project_line(p));
                }
            }
            out.push('\n');
        }

        if let Some(d) = &self.project {
            let _ = writeln!(out, "## Project: {}", d.project.name);
            let _ = writeln!(out, "{}", project_line(&d.project));
            if let Some(desc) = d.description.as_deref().filter(|s| !s.trim().is_empty()) {
                let _ = writeln!(out, "Description: {desc}");
            }
            if d.tasks.is_empty() {
                let _ = writeln!(out, "No tasks yet.");
            } else {
                let _ = writeln!(out, "Tasks:");
                for task in d.tasks.iter().take(MAX_ROWS_PER_SECTION) {
                    let _ = writeln!(out, "- {}", task_line(task));
                }
                more_marker(&mut out, d.tasks.len());
            }
            out.push('\n');
        }

        out.trim_end().to_string()
    }
}

fn client_line(c: &ClientLine) -> String {
    let mut line = c.name.clone();
    if let Some(company) = c.company.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(line, " ({company})");
    }
    let _ = write!(line, " [{}]", c.status);
    if let Some(fee) = c.monthly_fee_cents {
        let _ = write!(line, " fee {}/month", format_brl(fee));
    }
    line
}

fn project_line(p: &ProjectLine) -> String {
    let mut line = format!("{} for {} [{}]", p.name, p.client_name, p.status);
    if let Some(budget) = p.budget_cents {
        let _ = write!(line, " budget {}", format_brl(budget));
    }
    if let Some(end) = p.end_date {
        let _ = write!(line, " due {end}");
    }
    line
}

fn task_line(t: &TaskLine) -> String {
    let mut line = format!("{} [{}, {}]", t.title, t.status, t.priority);
    if let Some(due) = t.due_date {
        let _ = write!(line, " due {due}");
    }
    line
}

fn more_marker(out: &mut String, len: usize) {
    if len > MAX_ROWS_PER_SECTION {
        let _ = writeln!(out, "... and {} more", len - MAX_ROWS_PER_SECTION);
    }
}
