use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users table - patient accounts
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::Gender).string().null())
                    .col(ColumnDef::new(Users::BloodType).string().null())
                    .col(ColumnDef::new(Users::PassportNum).string().null())
                    .col(ColumnDef::new(Users::Job).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        // Clinics table - clinic accounts and directory entries.
        // Password column holds either a PHC hash or a legacy plaintext value.
        manager
            .create_table(
                Table::create()
                    .table(Clinics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clinics::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clinics::Name).string().not_null())
                    .col(
                        ColumnDef::new(Clinics::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Clinics::Password).string().not_null())
                    .col(ColumnDef::new(Clinics::Address).string().not_null())
                    .col(
                        ColumnDef::new(Clinics::StartWorkingTime)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Clinics::EndWorkingTime).string().not_null())
                    .col(ColumnDef::new(Clinics::Languages).text().not_null())
                    .col(ColumnDef::new(Clinics::RegisterNumber).string().not_null())
                    .col(ColumnDef::new(Clinics::Statement).text().not_null())
                    .col(ColumnDef::new(Clinics::Images).text().not_null())
                    .col(
                        ColumnDef::new(Clinics::AvgRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Clinics::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Clinics::Latitude).string().not_null())
                    .col(ColumnDef::new(Clinics::Longitude).string().not_null())
                    .col(ColumnDef::new(Clinics::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Clinics::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clinics_email")
                    .table(Clinics::Table)
                    .col(Clinics::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clinics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    AvatarUrl,
    Gender,
    BloodType,
    PassportNum,
    Job,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Clinics {
    Table,
    Id,
    Name,
    Email,
    Password,
    Address,
    StartWorkingTime,
    EndWorkingTime,
    Languages,
    RegisterNumber,
    Statement,
    Images,
    AvgRating,
    ReviewCount,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
