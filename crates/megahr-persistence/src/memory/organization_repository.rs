//! In-Memory Organization Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{CareersPageSettings, Department, JobLocation},
    errors::DomainResult,
    repositories::OrganizationRepository,
    value_objects::{CompanyId, DepartmentId, LocationId},
};

use super::store::{remove_existing, MemoryStore};
use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of OrganizationRepository
#[derive(Debug, Clone)]
pub struct InMemoryOrganizationRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryOrganizationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn list_departments(&self, company_id: CompanyId) -> DomainResult<Vec<Department>> {
        let mut departments: Vec<Department> = self.store.read(|t| {
            t.departments
                .values()
                .filter(|d| d.company_id == company_id)
                .cloned()
                .collect()
        });
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    async fn find_department(&self, id: DepartmentId) -> DomainResult<Option<Department>> {
        Ok(self.store.read(|t| t.departments.get(&id).cloned()))
    }

    async fn save_department(&self, department: &Department) -> DomainResult<()> {
        self.store.write(|t| {
            let taken = t.departments.values().any(|d| {
                d.company_id == department.company_id
                    && d.id != department.id
                    && d.name.eq_ignore_ascii_case(&department.name)
            });
            if taken {
                return Err(PersistenceError::unique("Department", "companyId, name"));
            }
            t.departments.insert(department.id, department.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn delete_department(&self, id: DepartmentId) -> DomainResult<()> {
        self.store.transaction(|t| {
            remove_existing(&mut t.departments, &id, "Department", id)?;
            for job in t.jobs.values_mut().filter(|j| j.department_id == Some(id)) {
                job.department_id = None;
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn list_locations(&self, company_id: CompanyId) -> DomainResult<Vec<JobLocation>> {
        let mut locations: Vec<JobLocation> = self.store.read(|t| {
            t.locations
                .values()
                .filter(|l| l.company_id == company_id)
                .cloned()
                .collect()
        });
        locations.sort_by(|a, b| (&a.country, &a.city).cmp(&(&b.country, &b.city)));
        Ok(locations)
    }

    async fn find_location(&self, id: LocationId) -> DomainResult<Option<JobLocation>> {
        Ok(self.store.read(|t| t.locations.get(&id).cloned()))
    }

    async fn save_location(&self, location: &JobLocation) -> DomainResult<()> {
        self.store.write(|t| {
            t.locations.insert(location.id, location.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn delete_location(&self, id: LocationId) -> DomainResult<()> {
        self.store.transaction(|t| {
            remove_existing(&mut t.locations, &id, "JobLocation", id)?;
            for job in t.jobs.values_mut().filter(|j| j.location_id == Some(id)) {
                job.location_id = None;
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn careers_page(
        &self,
        company_id: CompanyId,
    ) -> DomainResult<Option<CareersPageSettings>> {
        Ok(self.store.read(|t| t.careers_pages.get(&company_id).cloned()))
    }

    async fn save_careers_page(&self, settings: &CareersPageSettings) -> DomainResult<()> {
        self.store.write(|t| {
            t.careers_pages.insert(settings.company_id, settings.clone());
            Ok(())
        })?;
        Ok(())
    }
}
