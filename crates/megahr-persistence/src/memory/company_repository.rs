//! In-Memory Company Repository Implementation

use std::sync::Arc;

use async_trait::async_trait;

use megahr_domain::{
    entities::{Company, CompanyMember, CompanySetup},
    errors::DomainResult,
    repositories::CompanyRepository,
    value_objects::{CompanyId, UserId},
};

use super::store::{insert_unique, remove_existing, replace_existing, MemoryStore};

/// Thread-safe in-memory implementation of CompanyRepository
#[derive(Debug, Clone)]
pub struct InMemoryCompanyRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCompanyRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn create(&self, setup: &CompanySetup) -> DomainResult<()> {
        let company_id = setup.company.id;
        self.store.transaction(|t| {
            insert_unique(
                &mut t.companies,
                company_id,
                setup.company.clone(),
                "Company",
                "id",
            )?;
            let member = &setup.owner_membership;
            insert_unique(
                &mut t.members,
                (member.company_id, member.user_id),
                member.clone(),
                "CompanyMember",
                "companyId, userId",
            )?;
            t.careers_pages.insert(company_id, setup.careers_page.clone());
            for template in &setup.message_templates {
                t.message_templates.insert(template.id, template.clone());
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn update(&self, company: &Company) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(&mut t.companies, company.id, company.clone(), "Company", company.id)
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: CompanyId) -> DomainResult<Option<Company>> {
        Ok(self.store.read(|t| t.companies.get(&id).cloned()))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> DomainResult<Vec<(Company, CompanyMember)>> {
        let mut companies: Vec<(Company, CompanyMember)> = self.store.read(|t| {
            t.members
                .values()
                .filter(|m| m.user_id == user_id)
                .filter_map(|m| t.companies.get(&m.company_id).map(|c| (c.clone(), m.clone())))
                .collect()
        });
        companies.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        Ok(companies)
    }

    async fn find_member(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> DomainResult<Option<CompanyMember>> {
        Ok(self
            .store
            .read(|t| t.members.get(&(company_id, user_id)).cloned()))
    }

    async fn list_members(&self, company_id: CompanyId) -> DomainResult<Vec<CompanyMember>> {
        let mut members: Vec<CompanyMember> = self.store.read(|t| {
            t.members
                .values()
                .filter(|m| m.company_id == company_id)
                .cloned()
                .collect()
        });
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }

    async fn add_member(&self, member: &CompanyMember) -> DomainResult<()> {
        self.store.write(|t| {
            insert_unique(
                &mut t.members,
                (member.company_id, member.user_id),
                member.clone(),
                "CompanyMember",
                "companyId, userId",
            )
        })?;
        Ok(())
    }

    async fn update_member(&self, member: &CompanyMember) -> DomainResult<()> {
        self.store.write(|t| {
            replace_existing(
                &mut t.members,
                (member.company_id, member.user_id),
                member.clone(),
                "CompanyMember",
                member.user_id,
            )
        })?;
        Ok(())
    }

    async fn remove_member(&self, company_id: CompanyId, user_id: UserId) -> DomainResult<()> {
        self.store.transaction(|t| {
            remove_existing(&mut t.members, &(company_id, user_id), "CompanyMember", user_id)?;
            let company_jobs: Vec<_> = t
                .jobs
                .values()
                .filter(|j| j.company_id == company_id)
                .map(|j| j.id)
                .collect();
            t.hiring_team
                .retain(|(job_id, uid), _| !(*uid == user_id && company_jobs.contains(job_id)));
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megahr_domain::roles::CompanyMemberRole;

    #[tokio::test]
    async fn test_create_seeds_owner_and_defaults() {
        let store = Arc::new(MemoryStore::new());
        let repo = InMemoryCompanyRepository::new(store.clone());
        let owner = UserId::new();
        let setup = CompanySetup::new(Company::new("Acme", owner));
        repo.create(&setup).await.unwrap();

        let member = repo.find_member(setup.company.id, owner).await.unwrap().unwrap();
        assert_eq!(member.role, CompanyMemberRole::RecruitingAdmin);
        assert!(store.read(|t| t.careers_pages.contains_key(&setup.company.id)));
        assert_eq!(store.read(|t| t.message_templates.len()), 4);
    }

    #[tokio::test]
    async fn test_member_pair_is_unique() {
        let repo = InMemoryCompanyRepository::new(Arc::new(MemoryStore::new()));
        let member = CompanyMember::new(
            CompanyId::new(),
            UserId::new(),
            CompanyMemberRole::Reviewer,
        );
        repo.add_member(&member).await.unwrap();
        assert!(repo.add_member(&member).await.is_err());
        repo.remove_member(member.company_id, member.user_id).await.unwrap();
        assert!(repo.remove_member(member.company_id, member.user_id).await.is_err());
    }
}
