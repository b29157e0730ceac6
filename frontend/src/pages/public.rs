//! Controllers for pages that render without fetching.

use async_trait::async_trait;

use crate::domain::Error;
use crate::views::{home_page, login_page, not_found_page, register_page};

use super::{Page, PageContext, PageOutcome};

pub struct HomePage;

#[async_trait]
impl Page for HomePage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        ctx.surface.render(home_page(ctx.user().as_ref()));
        Ok(PageOutcome::Rendered)
    }
}

pub struct LoginPage;

#[async_trait]
impl Page for LoginPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        ctx.surface.render(login_page(ctx.user().as_ref()));
        Ok(PageOutcome::Rendered)
    }
}

pub struct RegisterPage;

#[async_trait]
impl Page for RegisterPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        ctx.surface.render(register_page(ctx.user().as_ref()));
        Ok(PageOutcome::Rendered)
    }
}

/// Fallback for unknown paths.
pub struct NotFoundPage;

#[async_trait]
impl Page for NotFoundPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        ctx.surface.render(not_found_page(ctx.user().as_ref()));
        Ok(PageOutcome::Rendered)
    }
}
