use utoipa::{Modify, OpenApi};

use crate::features::applications::{
    dtos as applications_dtos, handlers as applications_handlers, models as applications_models,
};
use crate::features::cooperatives::{dtos as cooperatives_dtos, handlers as cooperatives_handlers};
use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Regions
        regions_handlers::list_provinces,
        regions_handlers::get_province,
        regions_handlers::create_province,
        regions_handlers::update_province,
        regions_handlers::delete_province,
        regions_handlers::list_cities_by_province,
        regions_handlers::list_cities,
        regions_handlers::get_city,
        regions_handlers::create_city,
        regions_handlers::update_city,
        regions_handlers::delete_city,
        regions_handlers::list_subdistricts_by_city,
        regions_handlers::list_subdistricts,
        regions_handlers::get_subdistrict,
        regions_handlers::create_subdistrict,
        regions_handlers::update_subdistrict,
        regions_handlers::delete_subdistrict,
        // Cooperatives
        cooperatives_handlers::list_cooperatives,
        cooperatives_handlers::get_cooperative,
        cooperatives_handlers::create_cooperative,
        cooperatives_handlers::update_cooperative,
        cooperatives_handlers::delete_cooperative,
        cooperatives_handlers::list_cooperatives_by_subdistrict,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Reports
        reports_handlers::list_saving_reports,
        reports_handlers::get_saving_report,
        reports_handlers::create_saving_report,
        reports_handlers::update_saving_report,
        reports_handlers::delete_saving_report,
        reports_handlers::list_loan_reports,
        reports_handlers::get_loan_report,
        reports_handlers::create_loan_report,
        reports_handlers::update_loan_report,
        reports_handlers::delete_loan_report,
        // Applications
        applications_handlers::list_applications,
        applications_handlers::get_application,
        applications_handlers::create_application,
        applications_handlers::update_application,
        applications_handlers::resolve_application,
        applications_handlers::delete_application,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Regions
            regions_dtos::ProvinceResponseDto,
            regions_dtos::CityResponseDto,
            regions_dtos::SubdistrictResponseDto,
            regions_dtos::CreateProvinceDto,
            regions_dtos::UpdateProvinceDto,
            regions_dtos::CreateCityDto,
            regions_dtos::UpdateCityDto,
            regions_dtos::CreateSubdistrictDto,
            regions_dtos::UpdateSubdistrictDto,
            ApiResponse<Vec<regions_dtos::ProvinceResponseDto>>,
            ApiResponse<regions_dtos::ProvinceResponseDto>,
            ApiResponse<Vec<regions_dtos::CityResponseDto>>,
            ApiResponse<regions_dtos::CityResponseDto>,
            ApiResponse<Vec<regions_dtos::SubdistrictResponseDto>>,
            ApiResponse<regions_dtos::SubdistrictResponseDto>,
            // Cooperatives
            cooperatives_dtos::CooperativeResponseDto,
            cooperatives_dtos::CreateCooperativeDto,
            cooperatives_dtos::UpdateCooperativeDto,
            ApiResponse<Vec<cooperatives_dtos::CooperativeResponseDto>>,
            ApiResponse<cooperatives_dtos::CooperativeResponseDto>,
            // Users
            users_models::UserRole,
            users_dtos::UserResponseDto,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            ApiResponse<users_dtos::UserResponseDto>,
            // Reports
            reports_models::SavingType,
            reports_models::LoanStatus,
            reports_dtos::SavingReportResponseDto,
            reports_dtos::CreateSavingReportDto,
            reports_dtos::UpdateSavingReportDto,
            reports_dtos::LoanReportResponseDto,
            reports_dtos::CreateLoanReportDto,
            reports_dtos::UpdateLoanReportDto,
            ApiResponse<Vec<reports_dtos::SavingReportResponseDto>>,
            ApiResponse<reports_dtos::SavingReportResponseDto>,
            ApiResponse<Vec<reports_dtos::LoanReportResponseDto>>,
            ApiResponse<reports_dtos::LoanReportResponseDto>,
            // Applications
            applications_models::ApplicationType,
            applications_models::ApplicationStatus,
            applications_dtos::ApplicationResponseDto,
            applications_dtos::CreateApplicationDto,
            applications_dtos::UpdateApplicationDto,
            applications_dtos::ResolveApplicationDto,
            applications_dtos::ApplicationDecision,
            ApiResponse<Vec<applications_dtos::ApplicationResponseDto>>,
            ApiResponse<applications_dtos::ApplicationResponseDto>,
        )
    ),
    tags(
        (name = "regions", description = "Indonesian administrative regions (provinces, cities, subdistricts)"),
        (name = "cooperatives", description = "Cooperative (koperasi) registry"),
        (name = "users", description = "User account management"),
        (name = "reports", description = "Savings and loan report ledgers"),
        (name = "applications", description = "Save/borrow application requests"),
    ),
    info(
        title = "Koperasi API",
        version = "0.1.0",
        description = "API documentation for the koperasi registry",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
