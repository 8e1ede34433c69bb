// Tenant Provisioning Use Cases (super-admin)

use crate::domain::{Business, BusinessId};
use crate::error::{AppError, Result};
use crate::port::{CredentialHasher, IdProvider, TimeProvider, TransactionalQueueStore};
use serde::{Deserialize, Serialize};
use tracing::info;

const MAX_SLUG_LEN: usize = 64;
const MAX_NAME_LEN: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBusinessRequest {
    pub slug: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBusinessRequest {
    pub id: BusinessId,
    pub slug: String,
    pub name: String,

    /// Empty or absent keeps the stored credential untouched
    #[serde(default)]
    pub password: Option<String>,
}

fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(AppError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::Validation(format!(
            "Slug too long (max {} chars)",
            MAX_SLUG_LEN
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(
            "Slug must be URL-safe: lowercase alphanumeric, '-' or '_'".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name too long (max {} chars)",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

pub(crate) fn validate_create(req: &CreateBusinessRequest) -> Result<()> {
    validate_slug(&req.slug)?;
    validate_name(&req.name)?;
    if req.password.is_empty() {
        return Err(AppError::Validation(
            "Password must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Create a new business with zeroed counters, online by default
pub async fn create(
    store: &dyn TransactionalQueueStore,
    hasher: &dyn CredentialHasher,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: CreateBusinessRequest,
) -> Result<BusinessId> {
    validate_create(&req)?;

    let mut tx = store.begin_transaction().await?;

    if tx.find_business_by_slug(&req.slug).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Slug '{}' is already in use",
            req.slug
        )));
    }

    let credential = hasher.hash(&req.password)?;
    let business = Business::new(
        id_provider.generate_id(),
        time_provider.now_millis(),
        req.slug,
        req.name,
        Some(credential),
    );

    tx.insert_business(&business).await?;
    tx.commit().await?;

    info!(slug = %business.slug, "Business created");

    Ok(business.id)
}

/// Update name, slug and optionally the password. An empty password
/// preserves the existing credential byte-for-byte.
pub async fn update(
    store: &dyn TransactionalQueueStore,
    hasher: &dyn CredentialHasher,
    req: UpdateBusinessRequest,
) -> Result<()> {
    validate_slug(&req.slug)?;
    validate_name(&req.name)?;

    let mut tx = store.begin_transaction().await?;

    let mut business = tx
        .find_business_by_id(&req.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", req.id)))?;

    if req.slug != business.slug {
        if let Some(other) = tx.find_business_by_slug(&req.slug).await? {
            if other.id != business.id {
                return Err(AppError::Conflict(format!(
                    "Slug '{}' is already in use",
                    req.slug
                )));
            }
        }
    }

    business.slug = req.slug;
    business.name = req.name;

    if let Some(password) = req.password.as_deref() {
        if !password.is_empty() {
            business.credential = Some(hasher.hash(password)?);
        }
    }

    tx.update_business(&business).await?;
    tx.commit().await?;

    Ok(())
}

/// Delete a business; its tickets are removed by cascade
pub async fn delete(store: &dyn TransactionalQueueStore, id: &BusinessId) -> Result<()> {
    let mut tx = store.begin_transaction().await?;

    let business = tx
        .find_business_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", id)))?;

    tx.delete_business(&business.id).await?;
    tx.commit().await?;

    info!(slug = %business.slug, "Business deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(slug: &str, name: &str, password: &str) -> CreateBusinessRequest {
        CreateBusinessRequest {
            slug: slug.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_empty_slug() {
        let result = validate_create(&request("", "Cafe", "pw"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_validate_slug_invalid_chars() {
        let result = validate_create(&request("Corner Cafe!", "Cafe", "pw"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("URL-safe"));
    }

    #[test]
    fn test_validate_slug_too_long() {
        let result = validate_create(&request(&"a".repeat(65), "Cafe", "pw"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_validate_empty_name() {
        let result = validate_create(&request("cafe", "  ", "pw"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Name"));
    }

    #[test]
    fn test_validate_empty_password() {
        let result = validate_create(&request("cafe", "Cafe", ""));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Password"));
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(validate_create(&request("corner-cafe_2", "Corner Cafe", "pw")).is_ok());
    }
}
