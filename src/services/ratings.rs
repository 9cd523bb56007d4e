use crate::core::error::HelpCenterError;
use crate::models::catalog::Tool;
use crate::models::rating::{checked_rating, normalize_comments, NewRating, Rating, RatingEdit};
use crate::models::user::User;
use crate::security::admin_gate::AdminGate;
use crate::stores::ids::IdGenerator;
use crate::stores::store::Store;
use crate::utils::time::now;
use tracing::{debug, info};

/// Public tool reviews and their moderation
pub struct RatingService<'a> {
    store: &'a Store,
    ids: &'a IdGenerator,
}

impl<'a> RatingService<'a> {
    pub fn new(store: &'a Store, ids: &'a IdGenerator) -> Self {
        Self { store, ids }
    }

    fn gate(&self) -> AdminGate<'a> {
        AdminGate::new(self.store)
    }

    pub fn submit(&self, session: Option<&User>, form: NewRating) -> Result<Rating, HelpCenterError> {
        let user = session.ok_or(HelpCenterError::AuthRequired)?;
        let stars = checked_rating(form.rating).ok_or(HelpCenterError::InvalidRating(form.rating))?;

        let rating = Rating {
            id: self.ids.next_id()?,
            user_id: user.id,
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            tool: form.tool,
            rating: stars,
            comments: normalize_comments(form.comments),
            email: form.contact_email,
            timestamp: now(),
            edited_by: None,
            edited_at: None,
        };

        let mut ratings = self.store.try_ratings()?;
        ratings.push(rating.clone());
        self.store.save_ratings(&ratings)?;

        info!(
            rating_id = rating.id,
            user_id = user.id,
            tool = %rating.tool,
            stars = rating.rating,
            "Rating submitted"
        );

        Ok(rating)
    }

    /// Ratings for one tool (or all), newest first
    pub fn list(&self, tool: Option<Tool>) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = self
            .store
            .ratings()
            .into_iter()
            .filter(|r| tool.map_or(true, |t| r.tool == t))
            .collect();
        ratings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        debug!(tool = ?tool, count = ratings.len(), "Listed ratings");
        ratings
    }

    /// Admin rewrite of a rating's stars, comments and tool
    pub fn edit(&self, session: Option<&User>, rating_id: u64, changes: RatingEdit) -> Result<Rating, HelpCenterError> {
        let admin = self.gate().require_admin(session)?;

        let mut ratings = self.store.try_ratings()?;
        let rating = ratings
            .iter_mut()
            .find(|r| r.id == rating_id)
            .ok_or_else(|| HelpCenterError::NotFound(format!("Rating {}", rating_id)))?;

        let stars = checked_rating(changes.rating).ok_or(HelpCenterError::InvalidRating(changes.rating))?;

        rating.rating = stars;
        rating.comments = normalize_comments(changes.comments);
        rating.tool = changes.tool;
        rating.edited_by = Some(admin.email.clone());
        rating.edited_at = Some(now());
        let edited = rating.clone();

        self.store.save_ratings(&ratings)?;

        info!(rating_id = rating_id, edited_by = %admin.email, stars = stars, "Rating edited");

        Ok(edited)
    }

    /// Delete a rating. Any confirmation prompt belongs to the caller.
    pub fn remove(&self, session: Option<&User>, rating_id: u64) -> Result<Rating, HelpCenterError> {
        let admin = self.gate().require_admin(session)?;

        let mut ratings = self.store.try_ratings()?;
        let index = ratings
            .iter()
            .position(|r| r.id == rating_id)
            .ok_or_else(|| HelpCenterError::NotFound(format!("Rating {}", rating_id)))?;

        let removed = ratings.remove(index);
        self.store.save_ratings(&ratings)?;

        info!(
            rating_id = rating_id,
            author = %removed.user_name,
            removed_by = %admin.email,
            "Rating removed"
        );

        Ok(removed)
    }
}
