/*!
# Alumni Registry

A browser for the alumni registry of the Department of Mathematics, FMIPA UI,
built in Rust.

## Overview

The registry is a spreadsheet with one row per alumnus. The application loads
it once, keeps an in-memory copy per user session and offers five pages:
a welcome screen, a filtered search with a per-record detail view, company
statistics, and a form for adding records to the session's copy.

## Architecture

### Core
- **Record model** - Thirteen-field records and the ordered record set
- **Currency formatter** - Indonesian Rupiah display strings
- **Loader** - Spreadsheet/CSV reading, normalisation and sample fallback
- **Session state** - Current page, filters, selection and pending notices
- **Router** - Action dispatch to the page handlers and page rendering

### Front-ends
- **Web** (`web` feature) - axum server with handlebars templates and
  cookie-based sessions
- **Terminal** - line-oriented REPL over the same actions

## Modules

- **currency**: Rupiah formatting
- **record**: Alumni records, programmes and display sections
- **loader**: Data loading and the process-wide cache
- **state**: Pages, transitions, filters and the session state
- **pages**: Per-page view builders and action handlers
- **router**: Dispatch and render cycle
- **session**: Per-user session store
- **downloader**: Export functionality (CSV, XLSX)
- **terminal**: Text rendering and command parsing
- **app**: Routing and middleware

## REST API Endpoints

- `/navigate/{page}` - Follows a navigation link
- `/search`, `/search/clear`, `/search/select` - Search interactions
- `/add` - Submits the add form
- `/export/csv`, `/export/xlsx` - Downloads the current search result
- `/api/records`, `/api/statistics` - JSON views
*/

#[cfg(feature = "web")]
pub mod app;
pub mod config;
pub mod currency;
pub mod downloader;
pub mod error;
pub mod loader;
pub mod notice;
pub mod pages;
pub mod record;
pub mod router;
pub mod session;
pub mod state;
pub mod terminal;
