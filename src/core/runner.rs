use crate::domain::ports::PageController;
use crate::domain::view::Outcome;
use crate::utils::error::Result;
use std::time::Instant;

/// Drives one page submission: validate, call the backend once, present the answer.
///
/// A failed call is replaced by the page's fallback view only when fallbacks are enabled;
/// validation failures never reach the network and never fall back.
pub struct PageRunner<P: PageController> {
    page: P,
    fallback_enabled: bool,
}

impl<P: PageController> PageRunner<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            fallback_enabled: true,
        }
    }

    pub fn with_fallback(page: P, fallback_enabled: bool) -> Self {
        Self {
            page,
            fallback_enabled,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub async fn run(&self, form: &P::Form) -> Result<Outcome<P::View>> {
        let name = self.page.name();
        let started = Instant::now();

        self.page.validate(form)?;
        tracing::debug!("[{}] form validated", name);

        let result = match self.page.call(form).await {
            Ok(response) => {
                tracing::debug!("[{}] backend answered in {:?}", name, started.elapsed());
                self.page.present(form, response)
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => {
                tracing::info!("✅ [{}] completed in {:?}", name, started.elapsed());
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(
                    "❌ [{}] failed: {} (Category: {:?}, Severity: {:?})",
                    name,
                    e,
                    e.category(),
                    e.severity()
                );

                if self.fallback_enabled {
                    if let Some(outcome) = self.page.fallback(form, &e) {
                        tracing::warn!("[{}] backend unavailable, showing demo data", name);
                        return Ok(outcome);
                    }
                }
                Err(e)
            }
        }
    }
}
