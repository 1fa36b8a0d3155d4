use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Qualifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Qualifications::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Qualifications::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Specializations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Specializations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Specializations::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Doctors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doctors::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doctors::FirstName).string().not_null())
                    .col(ColumnDef::new(Doctors::LastName).string().not_null())
                    .col(ColumnDef::new(Doctors::AvatarUrl).string().not_null())
                    .col(ColumnDef::new(Doctors::Gender).string().null())
                    .col(ColumnDef::new(Doctors::Status).string().null())
                    .col(
                        ColumnDef::new(Doctors::QualificationId)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Reference tables linking clinics to their specializations,
        // services and doctors, and doctors to their specializations.
        manager
            .create_table(
                Table::create()
                    .table(ClinicSpecializations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClinicSpecializations::ClinicId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClinicSpecializations::SpecializationId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ClinicSpecializations::ClinicId)
                            .col(ClinicSpecializations::SpecializationId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClinicServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClinicServices::ClinicId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClinicServices::ServiceId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ClinicServices::ClinicId)
                            .col(ClinicServices::ServiceId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClinicDoctors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClinicDoctors::ClinicId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClinicDoctors::DoctorId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(ClinicDoctors::ClinicId)
                            .col(ClinicDoctors::DoctorId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DoctorSpecializations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DoctorSpecializations::DoctorId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DoctorSpecializations::SpecializationId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DoctorSpecializations::DoctorId)
                            .col(DoctorSpecializations::SpecializationId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DoctorSpecializations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClinicDoctors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClinicServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClinicSpecializations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specializations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Qualifications::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Qualifications {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Specializations {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
    FirstName,
    LastName,
    AvatarUrl,
    Gender,
    Status,
    QualificationId,
}

#[derive(Iden)]
enum ClinicSpecializations {
    Table,
    ClinicId,
    SpecializationId,
}

#[derive(Iden)]
enum ClinicServices {
    Table,
    ClinicId,
    ServiceId,
}

#[derive(Iden)]
enum ClinicDoctors {
    Table,
    ClinicId,
    DoctorId,
}

#[derive(Iden)]
enum DoctorSpecializations {
    Table,
    DoctorId,
    SpecializationId,
}
